use crate::log_debug;
use colored::Colorize;
use std::path::PathBuf;

/// Resolves a user-supplied path that may start with `~`.
/// `shellexpand::tilde` falls back to the input unchanged when no home directory is known.
///
/// # Arguments
/// * `path`: A string slice (`&str`) representing the path, which might start with `~`.
///
/// # Returns
/// * `PathBuf`: The expanded path.
pub fn expand_tilde(path: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(path).into_owned());
    if expanded.as_os_str() != path {
        log_debug!("Expanded '{}' to {}", path, expanded.display().to_string().cyan());
    }
    expanded
}
