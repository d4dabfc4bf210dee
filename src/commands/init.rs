// This file contains the primary logic for the `setup-venv init` command.
// It merges the command-line flags with the optional project config, creates the
// virtualenv, brings its packaging library up to date, installs extra packages and
// finally hands over to the project's own `setup.py develop`.

use crate::cli::type_enums::Platform;
use crate::installers::install_package;
use crate::libs::command_runner::{CommandLine, SystemRunner};
use crate::libs::config_loading::load_config;
use crate::libs::provisioner::create_environment;
use crate::libs::session::ProvisionSession;
use crate::libs::utilities::path_helpers::expand_tilde;
use crate::schemas::config::VenvConfig;
use crate::schemas::environment::{ToolVariant, VersionSpec};
use crate::{log_debug, log_info};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Packaging library bundled by virtualenv; it is usually outdated, so it is always upgraded.
const PACKAGING_LIBRARY: &str = "distribute";

/// The project descriptor whose presence triggers the development install.
const PROJECT_DESCRIPTOR: &str = "setup.py";

/// Raw `init` arguments as parsed from the command line.
pub struct InitArgs {
    pub python: Option<String>,
    pub upgrade: bool,
    pub dir: String,
    pub activepython: bool,
    pub config: Option<String>,
}

/// Fully resolved `init` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct InitPlan {
    pub version: VersionSpec,
    pub upgrade: bool,
    pub require_vendor_interpreter: bool,
    /// Absolute directory of the environment.
    pub env_dir: PathBuf,
    /// Directory holding `setup.py`.
    pub project_root: PathBuf,
    pub packages: Vec<String>,
}

impl InitPlan {
    /// Command-line flags win over the config file; boolean flags can only switch things on.
    pub fn merge(args: InitArgs, config: VenvConfig, project_root: PathBuf) -> Self {
        let env_dir = expand_tilde(&args.dir);
        let env_dir = if env_dir.is_absolute() {
            env_dir
        } else {
            project_root.join(env_dir)
        };
        InitPlan {
            version: VersionSpec::new(args.python.unwrap_or(config.python)),
            upgrade: args.upgrade || config.upgrade,
            require_vendor_interpreter: args.activepython || config.activepython,
            env_dir,
            project_root,
            packages: config.packages,
        }
    }
}

/// Main entry point for the `init` command.
pub fn run(platform: Platform, args: InitArgs) -> Result<()> {
    log_debug!("Entered init::run() function.");

    let project_root = std::env::current_dir().context("Failed to determine the current directory")?;
    let explicit_config = args.config.as_deref().map(expand_tilde);
    let config = load_config(explicit_config.as_deref(), &project_root)?;
    let wait = Duration::from_secs(config.creation_wait_secs);
    let plan = InitPlan::merge(args, config, project_root);

    let session = ProvisionSession::new(platform, &SystemRunner).with_creation_wait(wait);
    let variant = provision(&session, &plan)?;

    log_info!(
        "'setup-venv init' completed using {} for Python {}",
        variant.to_string().bold().green(),
        plan.version.to_string().bold()
    );
    Ok(())
}

/// Runs the whole provisioning sequence for `plan`.
///
/// 1. Create the environment, waiting for the creation tool if it detaches.
/// 2. Force-upgrade the packaging library.
/// 3. Install the configured extra packages.
/// 4. `python setup.py develop` when the project has a `setup.py`.
///
/// # Returns
/// * `Ok(ToolVariant)` naming the creation tool that was used.
pub fn provision(session: &ProvisionSession, plan: &InitPlan) -> Result<ToolVariant> {
    let variant = create_environment(
        session,
        &plan.version,
        &plan.env_dir,
        plan.require_vendor_interpreter,
    )
    .with_context(|| format!("Failed to create a Python {} environment", plan.version))?;

    install_package(session, PACKAGING_LIBRARY, &plan.env_dir, true)
        .with_context(|| format!("Failed to upgrade {PACKAGING_LIBRARY}"))?;

    for package in &plan.packages {
        install_package(session, package, &plan.env_dir, plan.upgrade)
            .with_context(|| format!("Failed to install {package}"))?;
    }

    develop(session, plan)?;
    Ok(variant)
}

fn develop(session: &ProvisionSession, plan: &InitPlan) -> Result<()> {
    let descriptor = plan.project_root.join(PROJECT_DESCRIPTOR);
    if !descriptor.is_file() {
        log_info!(
            "No {} in {}; skipping development install",
            PROJECT_DESCRIPTOR.yellow(),
            plan.project_root.display()
        );
        return Ok(());
    }

    let python = session.profile().env_python(&plan.env_dir);
    session
        .runner()
        .run(&develop_command(&python, &plan.project_root))
        .context("Failed to run `setup.py develop`")?;
    Ok(())
}

fn develop_command(env_python: &Path, project_root: &Path) -> CommandLine {
    CommandLine::new(env_python)
        .arg(PROJECT_DESCRIPTOR)
        .arg("develop")
        .current_dir(project_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::command_runner::testing::RecordingRunner;
    use std::fs;
    use tempfile::TempDir;

    fn plan_for(project: &Path, python: &str, packages: &[&str]) -> InitPlan {
        let config = VenvConfig {
            packages: packages.iter().map(|p| p.to_string()).collect(),
            ..VenvConfig::default()
        };
        InitPlan::merge(
            InitArgs {
                python: Some(python.to_string()),
                upgrade: false,
                dir: ".".to_string(),
                activepython: false,
                config: None,
            },
            config,
            project.to_path_buf(),
        )
    }

    #[test]
    fn cli_flags_override_config() {
        let config = VenvConfig {
            python: "3.1".to_string(),
            upgrade: true,
            ..VenvConfig::default()
        };
        let args = InitArgs {
            python: Some("2.6".to_string()),
            upgrade: false,
            dir: "env".to_string(),
            activepython: true,
            config: None,
        };
        let plan = InitPlan::merge(args, config, PathBuf::from("/work/project"));
        assert_eq!(plan.version, VersionSpec::new("2.6"));
        assert!(plan.upgrade);
        assert!(plan.require_vendor_interpreter);
        assert_eq!(plan.env_dir, PathBuf::from("/work/project").join("env"));
    }

    #[test]
    fn full_sequence_with_setup_py() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(project.path().join("setup.py"), "").unwrap();
        let plan = plan_for(project.path(), "2.7", &["nose"]);

        let runner = RecordingRunner::new().missing("pypm");
        let session = ProvisionSession::new(Platform::Unix, &runner).with_home_dir(Some(home.path().into()));
        let variant = provision(&session, &plan).unwrap();
        assert_eq!(variant, ToolVariant::Virtualenv);

        let env = project.path().join(".");
        let python = env.join("bin").join("python");
        assert_eq!(
            runner.lines(),
            vec![
                format!("virtualenv --no-site-packages --distribute -p python2.7 {}", env.display()),
                "pypm --version".to_string(),
                format!("{} -m easy_install -U distribute", python.display()),
                format!("{} -m easy_install nose", python.display()),
                format!("{} setup.py develop", python.display()),
            ]
        );
        let develop = runner.commands.borrow().last().cloned().unwrap();
        assert_eq!(develop.current_dir.as_deref(), Some(project.path()));
    }

    #[test]
    fn missing_setup_py_skips_develop() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let plan = plan_for(project.path(), "3.1", &[]);

        let runner = RecordingRunner::new().missing("pypm");
        let session = ProvisionSession::new(Platform::Unix, &runner).with_home_dir(Some(home.path().into()));
        assert_eq!(provision(&session, &plan).unwrap(), ToolVariant::Virtualenv5);
        assert!(!runner.lines().iter().any(|l| l.contains("setup.py")));
    }

    #[test]
    fn creation_failure_stops_everything() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(project.path().join("setup.py"), "").unwrap();
        let plan = plan_for(project.path(), "2.7", &[]);

        let runner = RecordingRunner::new().failing("virtualenv");
        let session = ProvisionSession::new(Platform::Unix, &runner).with_home_dir(Some(home.path().into()));
        let err = provision(&session, &plan).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to create a Python 2.7 environment"));
        assert_eq!(runner.lines().len(), 1);
    }
}
