// ActiveState PyPM, the vendor package manager shipped with ActivePython.

use crate::libs::command_runner::CommandLine;
use crate::libs::errors::VenvError;
use crate::libs::session::ProvisionSession;
use crate::log_debug;
use crate::schemas::environment::ProbeOutcome;
use colored::Colorize;
use std::path::Path;

const PYPM: &str = "pypm";

/// Whether `pypm` is usable. The probe runs once per session; later calls reuse it.
pub fn is_available(session: &ProvisionSession) -> bool {
    session
        .vendor_probe(|| probe(session))
        .is_present()
}

fn probe(session: &ProvisionSession) -> ProbeOutcome {
    let outcome = match session.runner().capture(&CommandLine::new(PYPM).arg("--version")) {
        Ok(_) => ProbeOutcome::Present,
        Err(VenvError::Spawn { .. }) => ProbeOutcome::Unavailable,
        Err(_) => ProbeOutcome::Absent,
    };
    log_debug!("[PyPM] Probe result: {}", format!("{outcome:?}").cyan());
    outcome
}

/// `pypm -E <env> install -f <package>`. PyPM always forces the install.
pub fn command(env_dir: &Path, package: &str) -> CommandLine {
    CommandLine::new(PYPM)
        .arg("-E")
        .arg(env_dir)
        .arg("install")
        .arg("-f")
        .arg(package)
}
