use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure the provisioning workflow can surface.
///
/// Commands wrap these in `anyhow` with context; nothing here is retried.
#[derive(Error, Debug)]
pub enum VenvError {
    /// The program could not be started (usually: not on PATH).
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    /// The program ran but exited non-zero.
    #[error("`{command}` failed with {status}{}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("Unsupported version control system in {}: expected a .svn or .git directory", .0.display())]
    UnsupportedVcs(PathBuf),
    #[error("Invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("Failed to {action} {}: {source}", .path.display())]
    Fs {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl VenvError {
    /// Shorthand for wrapping an `io::Error` together with the path it concerns.
    pub fn fs(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> VenvError {
        let path = path.into();
        move |source| VenvError::Fs { action, path, source }
    }
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

pub type Result<T, E = VenvError> = std::result::Result<T, E>;
