// Parks user-level readline shims while an environment is being created.
//
// virtualenv crashes when readline (or pyreadline on Windows) is installed in the
// user's personal site-packages. `ReadlineShimGuard` renames every matching file
// out of the way and puts it back when dropped, on success, error or unwind alike.

use crate::libs::errors::{Result, VenvError};
use crate::{log_debug, log_info, log_warn};
use colored::Colorize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to a shim while it is parked.
pub const PARKED_SUFFIX: &str = ".setup-venv-disabled";

/// Holds the renamed shims; restores them on drop.
#[derive(Debug, Default)]
pub struct ReadlineShimGuard {
    parked: Vec<(PathBuf, PathBuf)>,
}

impl ReadlineShimGuard {
    /// Expands `patterns` and renames every match to `<name>.setup-venv-disabled`.
    ///
    /// If a rename fails halfway, the guard built so far is dropped and the shims
    /// already parked are restored before the error is returned.
    pub fn park(patterns: &[String]) -> Result<Self> {
        let mut guard = ReadlineShimGuard::default();

        for pattern in patterns {
            let matches = glob::glob(pattern).map_err(|source| VenvError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            // Unreadable entries cannot be shims we are able to rename anyway.
            for original in matches.flatten() {
                if is_parked(&original) {
                    continue;
                }
                let parked = parked_path(&original);
                log_info!(
                    "Temporarily renaming {} (breaks virtualenv)",
                    original.display().to_string().yellow()
                );
                fs::rename(&original, &parked).map_err(VenvError::fs("rename", &original))?;
                guard.parked.push((original, parked));
            }
        }

        Ok(guard)
    }

    /// Shims currently parked, as `(original, parked)` pairs.
    pub fn parked(&self) -> &[(PathBuf, PathBuf)] {
        &self.parked
    }
}

impl Drop for ReadlineShimGuard {
    fn drop(&mut self) {
        for (original, parked) in self.parked.drain(..).rev() {
            match fs::rename(&parked, &original) {
                Ok(()) => log_debug!("Restored {}", original.display()),
                // Nothing to propagate from drop; leave a trail so the user can fix it.
                Err(e) => log_warn!(
                    "Could not restore {} from {}: {}",
                    original.display().to_string().red(),
                    parked.display(),
                    e
                ),
            }
        }
    }
}

fn parked_path(original: &Path) -> PathBuf {
    let mut name: OsString = original.as_os_str().to_owned();
    name.push(PARKED_SUFFIX);
    PathBuf::from(name)
}

fn is_parked(path: &Path) -> bool {
    path.to_string_lossy().ends_with(PARKED_SUFFIX)
}
