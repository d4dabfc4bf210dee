// Deletes everything version control ignores, to start a checkout from scratch.
//
// Subversion keeps ignore patterns in the `svn:ignore` property of the checkout
// root; git keeps them in `.gitignore`. Either way the patterns are glob-expanded
// relative to the root and every match is deleted. Subversion patterns only apply
// at the root; git patterns without an inner `/` apply at any depth.

use crate::libs::command_runner::{CommandLine, CommandRunner};
use crate::libs::errors::{Result, VenvError};
use crate::libs::utilities::file_operations::remove_path;
use crate::{log_debug, log_info, log_warn};
use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where ignore patterns come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreSource {
    Subversion,
    Git,
}

impl IgnoreSource {
    fn marker(self) -> &'static str {
        match self {
            IgnoreSource::Subversion => ".svn",
            IgnoreSource::Git => ".git",
        }
    }
}

/// Finds which VCS manages `root`. Subversion is checked first.
pub fn detect_vcs(root: &Path) -> Result<IgnoreSource> {
    [IgnoreSource::Subversion, IgnoreSource::Git]
        .into_iter()
        .find(|source| root.join(source.marker()).is_dir())
        .ok_or_else(|| VenvError::UnsupportedVcs(root.to_path_buf()))
}

/// Reads the raw ignore patterns for `root` and normalizes them.
pub fn ignore_patterns(runner: &dyn CommandRunner, root: &Path, source: IgnoreSource) -> Result<Vec<String>> {
    let raw = match source {
        IgnoreSource::Subversion => runner.capture(
            &CommandLine::new("svn")
                .arg("propget")
                .arg("svn:ignore")
                .arg(root),
        )?,
        IgnoreSource::Git => {
            let gitignore = root.join(".gitignore");
            match fs::read_to_string(&gitignore) {
                Ok(contents) => contents,
                Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
                Err(e) => return Err(VenvError::fs("read", gitignore)(e)),
            }
        }
    };
    Ok(normalize_patterns(&raw))
}

/// Trims every line and drops blanks and `#` comments.
pub fn normalize_patterns(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Deletes every path under `root` matching an ignore pattern.
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - the deleted paths, in deletion order.
/// * `Err(VenvError::UnsupportedVcs)` if `root` has neither `.svn` nor `.git`.
pub fn clean(runner: &dyn CommandRunner, root: &Path) -> Result<Vec<PathBuf>> {
    let source = detect_vcs(root)?;
    log_debug!("[Clean] Using {:?} ignore patterns in {}", source, root.display());

    let mut deleted = Vec::new();
    for pattern in ignore_patterns(runner, root, source)? {
        if pattern.starts_with('!') {
            log_warn!("[Clean] Skipping negated pattern {}", pattern.yellow());
            continue;
        }
        for path in expand(root, &pattern, source)? {
            // Already gone with a parent directory, or version control's own data.
            if !path.exists() || is_vcs_data(root, &path, source) {
                continue;
            }
            log_info!("Deleting {}", path.display().to_string().red());
            remove_path(&path)?;
            deleted.push(path);
        }
    }
    Ok(deleted)
}

fn is_vcs_data(root: &Path, path: &Path, source: IgnoreSource) -> bool {
    path.strip_prefix(root)
        .map(|relative| relative.components().any(|c| c.as_os_str() == source.marker()))
        .unwrap_or(false)
}

/// Glob-expands one pattern relative to `root`. A trailing `/` matches directories only.
fn expand(root: &Path, pattern: &str, source: IgnoreSource) -> Result<Vec<PathBuf>> {
    let dirs_only = pattern.ends_with('/');
    let anchored = pattern.starts_with('/');
    let relative = pattern.trim_end_matches('/').trim_start_matches('/');
    if relative.is_empty() {
        return Ok(Vec::new());
    }
    let relative = if source == IgnoreSource::Git && !anchored && !relative.contains('/') {
        format!("**/{relative}")
    } else {
        relative.to_string()
    };
    let full = format!("{}/{}", glob::Pattern::escape(&root.to_string_lossy()), relative);
    let matches = glob::glob(&full).map_err(|source| VenvError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(matches
        .flatten()
        .filter(|path| !dirs_only || path.is_dir())
        .collect())
}
