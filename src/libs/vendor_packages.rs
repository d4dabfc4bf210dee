// Makes the system-wide pywin32 installation visible inside a new environment.
//
// pywin32 cannot be pip-installed into an ActivePython virtualenv, so its `.pth`
// file is copied over with absolute paths and its support directories are copied
// next to it.

use crate::libs::command_runner::{CommandLine, CommandRunner};
use crate::libs::errors::{Result, VenvError};
use crate::libs::utilities::file_operations::copy_recursively;
use crate::{log_debug, log_info};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker file pywin32 drops into site-packages.
pub const PTH_FILE: &str = "pywin32.pth";

/// Sibling entries sharing this prefix are copied into the environment.
pub const PACKAGE_PREFIX: &str = "pywin32";

/// Asks `interpreter` where its site-packages directory is.
pub fn system_site_packages(runner: &dyn CommandRunner, interpreter: &str) -> Result<PathBuf> {
    let query = CommandLine::new(interpreter)
        .arg("-c")
        .arg("from distutils.sysconfig import get_python_lib; print(get_python_lib())");
    let stdout = runner.capture(&query)?;
    Ok(PathBuf::from(stdout.trim()))
}

/// Site-packages of a Windows virtualenv.
pub fn env_site_packages(env_dir: &Path) -> PathBuf {
    env_dir.join("Lib").join("site-packages")
}

/// Links pywin32 from `system_site` into `env_site` when the marker file is present.
///
/// # Returns
/// * `Ok(true)` if pywin32 was found and linked, `Ok(false)` if there was nothing to do.
pub fn link_pywin32(system_site: &Path, env_site: &Path) -> Result<bool> {
    let pth = system_site.join(PTH_FILE);
    if !pth.is_file() {
        log_debug!("No {} in {}; skipping pywin32", PTH_FILE, system_site.display());
        return Ok(false);
    }

    log_info!("Linking pywin32 from {}", system_site.display().to_string().cyan());
    fs::create_dir_all(env_site).map_err(VenvError::fs("create", env_site))?;

    let contents = fs::read_to_string(&pth).map_err(VenvError::fs("read", &pth))?;
    let rewritten = absolutize_pth(&contents, system_site);
    let target = env_site.join(PTH_FILE);
    fs::write(&target, rewritten).map_err(VenvError::fs("write", &target))?;

    let entries = fs::read_dir(system_site).map_err(VenvError::fs("list", system_site))?;
    for entry in entries {
        let entry = entry.map_err(VenvError::fs("list", system_site))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(PACKAGE_PREFIX) && name != PTH_FILE {
            copy_recursively(&entry.path(), &env_site.join(&*name))?;
        }
    }
    Ok(true)
}

/// Rewrites every relative path entry of a `.pth` file to an absolute one under `base`.
/// Blank lines, comments and `import` lines are kept verbatim.
pub fn absolutize_pth(contents: &str, base: &Path) -> String {
    let mut out = String::with_capacity(contents.len());
    for line in contents.lines() {
        let trimmed = line.trim();
        let keep = trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("import ")
            || trimmed.starts_with("import\t")
            || Path::new(trimmed).is_absolute();
        if keep {
            out.push_str(line);
        } else {
            out.push_str(&base.join(trimmed).to_string_lossy());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::command_runner::testing::RecordingRunner;
    use tempfile::TempDir;

    #[test]
    fn rewrites_relative_entries_only() {
        let base = Path::new("/opt/py/site-packages");
        let pth = "# .pth file for the PyWin32 extensions\nwin32\nwin32\\lib\n\nimport pywin32_bootstrap\n";
        let out = absolutize_pth(pth, base);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "# .pth file for the PyWin32 extensions");
        assert_eq!(lines[1], base.join("win32").to_string_lossy());
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "import pywin32_bootstrap");
    }

    #[test]
    fn links_pth_and_prefixed_siblings() {
        let tmp = TempDir::new().unwrap();
        let system = tmp.path().join("system");
        fs::create_dir_all(system.join("pywin32_system32")).unwrap();
        fs::write(system.join("pywin32_system32").join("pythoncom26.dll"), "").unwrap();
        fs::write(system.join(PTH_FILE), "win32\n").unwrap();
        fs::create_dir_all(system.join("win32")).unwrap();

        let env_site = env_site_packages(&tmp.path().join("env"));
        assert!(link_pywin32(&system, &env_site).unwrap());

        let pth = fs::read_to_string(env_site.join(PTH_FILE)).unwrap();
        assert_eq!(pth.trim_end(), system.join("win32").to_string_lossy());
        assert!(env_site.join("pywin32_system32").join("pythoncom26.dll").exists());
        assert!(!env_site.join("win32").exists());
    }

    #[test]
    fn nothing_to_do_without_marker() {
        let tmp = TempDir::new().unwrap();
        let env_site = tmp.path().join("env-site");
        assert!(!link_pywin32(tmp.path(), &env_site).unwrap());
        assert!(!env_site.exists());
    }

    #[test]
    fn site_packages_comes_from_the_interpreter() {
        let runner = RecordingRunner::new().with_output("python26.exe", "C:\\Python26\\lib\\site-packages\r\n");
        let site = system_site_packages(&runner, "python26.exe").unwrap();
        assert_eq!(site, PathBuf::from("C:\\Python26\\lib\\site-packages"));
    }
}
