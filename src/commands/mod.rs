// Register application subcommands.
// Each module corresponds to a specific `setup-venv` command-line action.

// Deletes files ignored by version control.
pub mod clean;
// Creates and provisions the virtualenv.
pub mod init;
// Installs one package into an environment.
pub mod install;
// Displays the version of setup-venv
pub mod version;
