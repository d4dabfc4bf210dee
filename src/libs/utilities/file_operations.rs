use crate::libs::errors::{Result, VenvError};
use crate::log_debug;
use colored::Colorize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copies a file, or a directory tree, from `source` to `destination`.
///
/// # Arguments
/// * `source` - File or directory to copy
/// * `destination` - Target path; parent directories are created as needed
///
/// # Returns
/// * `Result<()>` - `VenvError::Fs` naming the path that failed
pub fn copy_recursively(source: &Path, destination: &Path) -> Result<()> {
    if source.is_file() {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(VenvError::fs("create", parent))?;
        }
        fs::copy(source, destination).map_err(VenvError::fs("copy", source))?;
        return Ok(());
    }

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            VenvError::Fs {
                action: "walk",
                path,
                source: e.into(),
            }
        })?;
        // `strip_prefix` cannot fail: walkdir only yields paths below `source`.
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = destination.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(VenvError::fs("create", &target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(VenvError::fs("copy", entry.path()))?;
        }
    }
    log_debug!(
        "Copied {} to {}",
        source.display(),
        destination.display().to_string().cyan()
    );
    Ok(())
}

/// Removes a file or a whole directory tree.
pub fn remove_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path).map_err(VenvError::fs("delete", path))
    } else {
        fs::remove_file(path).map_err(VenvError::fs("delete", path))
    }
}
