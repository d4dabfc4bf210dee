// Command-line surface of `setup-venv`.

// Subcommand and flag definitions parsed by `clap`.
pub mod cmd_enums;
// Strongly-typed values accepted on the command line.
pub mod type_enums;
