use crate::cli::type_enums::Platform;
use clap::{Parser, Subcommand};

/// Defines the command-line interface (CLI) for 'setup-venv'.
/// `#[derive(Parser)]` automatically generates argument parsing code via `clap`.
#[derive(Parser)]
#[command(name = "setup-venv")]
#[command(about = "Create and provision a Python virtualenv for a project", long_about = None)]
pub struct Cli {
    /// Enables detailed debug output for troubleshooting and development.
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    /// Overrides the detected platform [possible values: windows, macos, unix].
    /// Decides interpreter naming, the scripts directory and the workarounds applied.
    #[arg(long, global = true, env = "SETUP_VENV_PLATFORM")]
    pub(crate) platform: Option<Platform>,

    /// Defines available subcommands for 'setup-venv'.
    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Enumerates all supported subcommands with their specific arguments and options.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the current Version of the tool.
    Version,
    /// Creates the virtualenv, upgrades its packaging library and runs `setup.py develop`.
    Init {
        /// Python version to build the environment for, as `X.Y` (default: 2.7).
        #[arg(long)]
        python: Option<String>,
        /// Upgrade packages that are already installed in the environment.
        #[arg(long)]
        upgrade: bool,
        /// Directory to create the environment in.
        #[arg(long, default_value = ".")]
        dir: String,
        /// Require ActivePython; runs its activation step before creating the environment.
        #[arg(long)]
        activepython: bool,
        /// Optional path to a `setup-venv.yaml` (defaults to the one in the current directory).
        #[arg(long)]
        config: Option<String>,
    },
    /// Installs a single package into an existing environment.
    Install {
        /// Name of the package to install.
        package: String,
        /// Directory of the environment.
        #[arg(long, default_value = ".")]
        dir: String,
        /// Pass the upgrade flag to the installer.
        #[arg(long)]
        upgrade: bool,
    },
    /// Deletes every file or directory ignored by version control (svn or git).
    Clean {
        /// Root of the checkout to clean.
        #[arg(long, default_value = ".")]
        dir: String,
    },
}
