// `setup-venv install <package>`: installs one package into an existing environment.

use crate::cli::type_enums::Platform;
use crate::installers::install_package;
use crate::libs::command_runner::SystemRunner;
use crate::libs::session::ProvisionSession;
use crate::libs::utilities::path_helpers::expand_tilde;
use anyhow::{Context, Result};

pub fn run(platform: Platform, package: &str, dir: &str, upgrade: bool) -> Result<()> {
    let env_dir = expand_tilde(dir);
    let session = ProvisionSession::new(platform, &SystemRunner);
    install_package(&session, package, &env_dir, upgrade)
        .with_context(|| format!("Failed to install {package} into {}", env_dir.display()))?;
    Ok(())
}
