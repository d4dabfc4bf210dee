// `setup-venv clean`: removes everything version control ignores.

use crate::libs::command_runner::SystemRunner;
use crate::libs::ignore_cleaner;
use crate::libs::utilities::path_helpers::expand_tilde;
use crate::log_info;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn run(dir: &str) -> Result<()> {
    let root = expand_tilde(dir);
    let deleted = ignore_cleaner::clean(&SystemRunner, &root)
        .with_context(|| format!("Failed to clean {}", root.display()))?;

    log_info!(
        "'setup-venv clean' removed {} path(s)",
        deleted.len().to_string().bold()
    );
    Ok(())
}
