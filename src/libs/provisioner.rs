// Creates the virtualenv itself.
// This is where the interpreter is resolved, the right creation tool is picked and
// the known virtualenv defects are worked around.

use crate::libs::command_runner::CommandLine;
use crate::libs::creation_wait::wait_for_detached_tool;
use crate::libs::errors::Result;
use crate::libs::interpreter::resolve_system_python;
use crate::libs::readline_guard::ReadlineShimGuard;
use crate::libs::session::ProvisionSession;
use crate::libs::vendor_packages::{env_site_packages, link_pywin32, system_site_packages};
use crate::schemas::environment::{ToolVariant, VersionSpec};
use crate::{log_debug, log_info, log_warn};
use colored::Colorize;
use std::path::Path;

/// Creates a virtualenv for `version` in `target_dir`.
///
/// # Workflow:
/// 1.  **Interpreter**: resolves the system Python for the session's platform.
/// 2.  **Tool variant**: `virtualenv5` for Python 3, `virtualenv --distribute` otherwise.
/// 3.  **ActivePython**: when required, runs `python -m activestate` first. A failure
///     aborts provisioning.
/// 4.  **Readline shims**: parks user-level readline shims for the duration of the
///     creation command and restores them afterwards, whatever the outcome.
/// 5.  **Creation**: runs the creation tool; a non-zero exit aborts provisioning.
///     Where the tool detaches, waits for it before the shims are restored.
/// 6.  **pywin32**: on platforms that need it, links the system pywin32 into the
///     new environment's site-packages.
///
/// # Returns
/// * `Ok(ToolVariant)` naming the creation tool that was used.
pub fn create_environment(
    session: &ProvisionSession,
    version: &VersionSpec,
    target_dir: &Path,
    require_vendor_interpreter: bool,
) -> Result<ToolVariant> {
    let profile = session.profile();
    let python = resolve_system_python(version, session.platform());
    let variant = ToolVariant::for_version(version);
    log_debug!(
        "[Provision] Python {} resolved to {}; using {}",
        version,
        python.cyan(),
        variant.to_string().bold()
    );

    if require_vendor_interpreter {
        log_info!("[Provision] Checking that {} is ActivePython", python.cyan());
        session
            .runner()
            .run(&CommandLine::new(&python).arg("-m").arg("activestate"))?;
    }

    let shim_patterns = match session.home_dir() {
        Some(home) => profile.readline_shim_patterns(home, version),
        None => {
            log_warn!("[Provision] Could not determine home directory; not checking for readline shims");
            Vec::new()
        }
    };

    {
        let shims = ReadlineShimGuard::park(&shim_patterns)?;
        log_debug!("[Provision] Parked {} readline shim(s)", shims.parked().len());
        log_info!(
            "[Provision] Creating environment in {}",
            target_dir.display().to_string().cyan()
        );
        session
            .runner()
            .run(&creation_command(variant, &python, target_dir))?;
        if profile.creation_detaches {
            wait_for_detached_tool(session.creation_wait());
        }
    }

    if profile.links_vendor_com_package {
        let system_site = system_site_packages(session.runner(), &python)?;
        link_pywin32(&system_site, &env_site_packages(target_dir))?;
    }

    Ok(variant)
}

/// `<tool> --no-site-packages [--distribute] -p <python> <target_dir>`
pub fn creation_command(variant: ToolVariant, python: &str, target_dir: &Path) -> CommandLine {
    CommandLine::new(variant.program())
        .arg("--no-site-packages")
        .arg_opt(variant.packaging_option())
        .arg("-p")
        .arg(python)
        .arg(target_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::type_enums::Platform;
    use crate::libs::command_runner::testing::RecordingRunner;
    use crate::libs::errors::VenvError;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn empty_home() -> TempDir {
        TempDir::new().unwrap()
    }

    fn user_site(home: &Path) -> PathBuf {
        home.join(".local/lib/python2.7/site-packages")
    }

    #[test]
    fn python3_uses_virtualenv5_without_distribute() {
        let home = empty_home();
        let runner = RecordingRunner::new();
        let session = ProvisionSession::new(Platform::Unix, &runner).with_home_dir(Some(home.path().into()));

        for version in ["3.0", "3.1", "3.2"] {
            let variant = create_environment(&session, &VersionSpec::new(version), Path::new("."), false).unwrap();
            assert_eq!(variant, ToolVariant::Virtualenv5);
        }
        for line in runner.lines() {
            assert!(line.starts_with("virtualenv5 --no-site-packages -p python3."));
            assert!(!line.contains("--distribute"));
        }
    }

    #[test]
    fn python2_uses_virtualenv_with_distribute() {
        let home = empty_home();
        let runner = RecordingRunner::new();
        let session = ProvisionSession::new(Platform::Unix, &runner).with_home_dir(Some(home.path().into()));

        let variant = create_environment(&session, &VersionSpec::new("2.6"), Path::new("env"), false).unwrap();
        assert_eq!(variant, ToolVariant::Virtualenv);
        assert_eq!(
            runner.lines(),
            vec!["virtualenv --no-site-packages --distribute -p python2.6 env"]
        );
    }

    #[test]
    fn activation_runs_first_and_its_failure_is_fatal() {
        let home = empty_home();
        let runner = RecordingRunner::new().failing("python2.7");
        let session = ProvisionSession::new(Platform::Unix, &runner).with_home_dir(Some(home.path().into()));

        let err = create_environment(&session, &VersionSpec::new("2.7"), Path::new("."), true).unwrap_err();
        assert!(matches!(err, VenvError::CommandFailed { .. }));
        assert_eq!(runner.lines(), vec!["python2.7 -m activestate"]);
    }

    #[test]
    fn shims_are_parked_during_creation_and_restored_after() {
        let home = empty_home();
        let site = user_site(home.path());
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("readline.so"), "").unwrap();

        let seen_parked = Rc::new(Cell::new(false));
        let observed = seen_parked.clone();
        let shim = site.join("readline.so");
        let runner = RecordingRunner::new().with_hook(move |cmd| {
            if cmd.program_name() == "virtualenv" {
                observed.set(!shim.exists());
            }
            Ok(())
        });
        let session = ProvisionSession::new(Platform::Unix, &runner).with_home_dir(Some(home.path().into()));

        create_environment(&session, &VersionSpec::new("2.7"), Path::new("."), false).unwrap();
        assert!(seen_parked.get(), "shim must be renamed while virtualenv runs");
        assert!(site.join("readline.so").exists());
        assert!(!site.join("readline.so.setup-venv-disabled").exists());
    }

    #[test]
    fn shims_are_restored_when_creation_fails() {
        let home = empty_home();
        let site = user_site(home.path());
        fs::create_dir_all(site.join("readline")).unwrap();

        let runner = RecordingRunner::new().failing("virtualenv");
        let session = ProvisionSession::new(Platform::Unix, &runner).with_home_dir(Some(home.path().into()));

        let err = create_environment(&session, &VersionSpec::new("2.7"), Path::new("."), false).unwrap_err();
        assert!(matches!(err, VenvError::CommandFailed { ref command, .. } if command.starts_with("virtualenv ")));
        assert!(site.join("readline").is_dir());
        assert!(!site.join("readline.setup-venv-disabled").exists());
    }

    #[test]
    fn windows_links_pywin32_after_creation() {
        let home = empty_home();
        let system = TempDir::new().unwrap();
        fs::write(system.path().join("pywin32.pth"), "win32\n").unwrap();
        let env = TempDir::new().unwrap();

        let runner = RecordingRunner::new().with_output("python26.exe", &system.path().display().to_string());
        let session = ProvisionSession::new(Platform::Windows, &runner).with_home_dir(Some(home.path().into()));

        let variant = create_environment(&session, &VersionSpec::new("2.6"), env.path(), false).unwrap();
        assert_eq!(variant, ToolVariant::Virtualenv);

        let lines = runner.lines();
        assert!(lines[0].starts_with("virtualenv --no-site-packages --distribute -p python26.exe"));
        assert!(lines[1].starts_with("python26.exe -c"));
        assert!(env.path().join("Lib/site-packages/pywin32.pth").exists());
    }

    #[test]
    fn detached_creation_keeps_shims_parked_until_the_wait_ends() {
        let _serial = crate::libs::creation_wait::serialize_waits();
        let home = empty_home();
        let site = home.path().join("AppData/Roaming/Python/Python26/site-packages");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("pyreadline.py"), "").unwrap();
        let system = TempDir::new().unwrap();
        let env = TempDir::new().unwrap();

        // (program, elapsed since start, shim present)
        let events = Rc::new(RefCell::new(Vec::new()));
        let recorded = events.clone();
        let shim = site.join("pyreadline.py");
        let start = Instant::now();
        let runner = RecordingRunner::new()
            .with_output("python26.exe", &system.path().display().to_string())
            .with_hook(move |cmd| {
                recorded
                    .borrow_mut()
                    .push((cmd.program_name(), start.elapsed(), shim.exists()));
                Ok(())
            });
        let wait = Duration::from_millis(300);
        let session = ProvisionSession::new(Platform::Windows, &runner)
            .with_home_dir(Some(home.path().into()))
            .with_creation_wait(wait);

        create_environment(&session, &VersionSpec::new("2.6"), env.path(), false).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        let (creator, _, present_during_creation) = &events[0];
        assert_eq!(creator, "virtualenv");
        assert!(!present_during_creation);
        let (query, at, _) = &events[1];
        assert_eq!(query, "python26.exe");
        assert!(*at >= wait, "pywin32 linked {at:?} after start, before the wait ended");
        assert!(site.join("pyreadline.py").exists());
    }
}
