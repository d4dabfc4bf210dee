// Prints the version `setup-venv` was built as.

use crate::log_info;
use colored::Colorize;

pub fn run() {
    log_info!(
        "{} {}",
        env!("CARGO_PKG_NAME").bold(),
        env!("CARGO_PKG_VERSION").green()
    );
}
