// This module is the hub for the package installers a virtualenv can be provisioned with,
// and the selector that decides which one a given install goes through.
//
// Precedence is fixed, first match wins:
//   1. PyPM, when the session's one-time probe found it
//   2. the environment's own pip
//   3. easy_install, through the environment's interpreter
// Exactly one command runs per install. If it fails, the failure is returned as-is;
// nothing falls through to the next installer.

/// Declares the `pypm` module: ActiveState's package manager, probed once per session.
pub(crate) mod pypm;

/// Declares the `pip` module, for the environment's `bin/pip` (`Scripts\pip.exe`).
pub(crate) mod pip;

/// Declares the `easy_install` module, the legacy fallback.
pub(crate) mod easy_install;

use crate::libs::command_runner::CommandLine;
use crate::libs::errors::Result;
use crate::libs::session::ProvisionSession;
use crate::schemas::environment::InstallerChoice;
use crate::{log_debug, log_info};
use colored::Colorize;
use std::path::Path;

/// Picks the installer for an environment in `env_dir`.
pub fn select_installer(session: &ProvisionSession, env_dir: &Path) -> InstallerChoice {
    if pypm::is_available(session) {
        InstallerChoice::Pypm
    } else if pip::executable(session.profile(), env_dir).exists() {
        InstallerChoice::Pip
    } else {
        InstallerChoice::EasyInstall
    }
}

/// Builds the install command for `choice`.
pub fn install_command(
    session: &ProvisionSession,
    choice: InstallerChoice,
    env_dir: &Path,
    package: &str,
    upgrade: bool,
) -> CommandLine {
    let profile = session.profile();
    match choice {
        InstallerChoice::Pypm => pypm::command(env_dir, package),
        InstallerChoice::Pip => pip::command(&pip::executable(profile, env_dir), package, upgrade),
        InstallerChoice::EasyInstall => easy_install::command(&profile.env_python(env_dir), package, upgrade),
    }
}

/// Installs `package` into the environment at `env_dir`.
///
/// # Arguments
/// * `session`: The provisioning session (platform, runner, cached PyPM probe).
/// * `package`: The package name, passed to the installer verbatim.
/// * `env_dir`: The environment directory.
/// * `force_upgrade`: Passes the upgrade flag to pip / easy_install. PyPM always forces.
///
/// # Returns
/// * `Ok(InstallerChoice)` naming the installer that ran.
/// * `Err(VenvError)` if the install command could not be started or exited non-zero.
pub fn install_package(
    session: &ProvisionSession,
    package: &str,
    env_dir: &Path,
    force_upgrade: bool,
) -> Result<InstallerChoice> {
    let choice = select_installer(session, env_dir);
    log_debug!("[Install] Selected {} for {}", choice.to_string().cyan(), package.bold());

    let command = install_command(session, choice, env_dir, package, force_upgrade);
    session.runner().run(&command)?;

    log_info!(
        "[Install] Installed {} with {}",
        package.bold().green(),
        choice.to_string().green()
    );
    Ok(choice)
}
