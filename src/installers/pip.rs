// pip from inside the environment's scripts directory.

use crate::libs::command_runner::CommandLine;
use crate::libs::utilities::platform::PlatformProfile;
use std::path::{Path, PathBuf};

/// Location of the environment's pip executable.
pub fn executable(profile: &PlatformProfile, env_dir: &Path) -> PathBuf {
    profile.env_script(env_dir, "pip")
}

/// `<env>/bin/pip install [-U] <package>`
pub fn command(pip: &Path, package: &str, upgrade: bool) -> CommandLine {
    CommandLine::new(pip)
        .arg("install")
        .arg_opt(upgrade.then_some("-U"))
        .arg(package)
}
