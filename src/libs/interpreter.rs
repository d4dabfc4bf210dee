// Resolves the system Python interpreter used to build an environment.
// Pure string construction: nothing here touches the filesystem or PATH.

use crate::cli::type_enums::Platform;
use crate::schemas::environment::VersionSpec;

/// Root of the python.org framework installs on macOS.
const FRAMEWORK_ROOT: &str = "/Library/Frameworks/Python.framework/Versions";

/// Returns the system interpreter for `version` on `platform`.
///
/// # Arguments
/// * `version`: The requested version, e.g. "2.7".
/// * `platform`: The resolved platform.
///
/// # Returns
/// * `String`: an executable name to look up on PATH, or an absolute path on macOS.
pub fn resolve_system_python(version: &VersionSpec, platform: Platform) -> String {
    (platform.profile().interpreter)(version)
}

/// ActivePython on Windows ships `pythonXY.exe` on PATH.
pub fn windows_python(version: &VersionSpec) -> String {
    format!("python{}{}.exe", version.major(), version.minor())
}

pub fn framework_python(version: &VersionSpec) -> String {
    format!("{FRAMEWORK_ROOT}/{version}/bin/python{version}")
}

pub fn path_python(version: &VersionSpec) -> String {
    format!("python{version}")
}
