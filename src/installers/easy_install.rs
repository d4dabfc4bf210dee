// easy_install, the last resort when an environment has no pip.
//
// It is started through the environment's interpreter (`python -m easy_install`)
// rather than through its launcher, whose process spawning is broken on Windows.

use crate::libs::command_runner::CommandLine;
use std::path::Path;

/// `<env>/bin/python -m easy_install [-U] <package>`
pub fn command(env_python: &Path, package: &str, upgrade: bool) -> CommandLine {
    CommandLine::new(env_python)
        .arg("-m")
        .arg("easy_install")
        .arg_opt(upgrade.then_some("-U"))
        .arg(package)
}
