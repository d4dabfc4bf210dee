// The command-execution capability the provisioning workflow is built on.
// Everything that touches an external tool (virtualenv, pip, pypm, svn, ...) goes
// through the `CommandRunner` trait, so the decision logic can be exercised with a
// recording runner instead of real processes.

use crate::libs::errors::{Result, VenvError};
use crate::log_info;
use colored::Colorize;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A single external command: program, arguments and an optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(program: impl Into<OsString>) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends the argument only when it is present.
    pub fn arg_opt(self, arg: Option<impl Into<OsString>>) -> Self {
        match arg {
            Some(arg) => self.arg(arg),
            None => self,
        }
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The program name as text, for matching and reporting.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn to_command(&self) -> Command {
        let resolved = if cfg!(windows) {
            which::which(&self.program).ok()
        } else {
            None
        };
        let mut cmd = match resolved.filter(|path| is_batch_script(path)) {
            // CreateProcess cannot start batch files; the shell has to.
            Some(script) => {
                tracing::debug!(script = %script.display(), "running batch wrapper through cmd");
                let mut cmd = Command::new("cmd");
                cmd.arg("/C").arg(script);
                cmd
            }
            None => Command::new(&self.program),
        };
        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// `true` for `.bat` and `.cmd` files, which Windows only runs through `cmd`.
fn is_batch_script(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bat") || ext.eq_ignore_ascii_case("cmd"))
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external commands synchronously.
///
/// Both methods fail with `VenvError::Spawn` when the program cannot be started and
/// with `VenvError::CommandFailed` when it exits non-zero.
pub trait CommandRunner {
    /// Runs the command with inherited stdout/stderr so the user sees its progress.
    fn run(&self, command: &CommandLine) -> Result<()>;

    /// Runs the command and returns its standard output as text.
    fn capture(&self, command: &CommandLine) -> Result<String>;
}

/// The real runner, backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    #[tracing::instrument(level = "debug", skip_all, fields(command = %command))]
    fn run(&self, command: &CommandLine) -> Result<()> {
        log_info!("Executing: {}", command.to_string().cyan());
        let status = command
            .to_command()
            .stdin(Stdio::inherit())
            .status()
            .map_err(|source| VenvError::Spawn {
                command: command.to_string(),
                source,
            })?;
        tracing::debug!(%status, "command finished");

        if status.success() {
            Ok(())
        } else {
            Err(VenvError::CommandFailed {
                command: command.to_string(),
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(command = %command))]
    fn capture(&self, command: &CommandLine) -> Result<String> {
        let output = command
            .to_command()
            .output()
            .map_err(|source| VenvError::Spawn {
                command: command.to_string(),
                source,
            })?;
        tracing::debug!(status = %output.status, stdout_len = output.stdout.len(), "command finished");

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(VenvError::CommandFailed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_program_and_arguments() {
        let cmd = CommandLine::new("virtualenv")
            .arg("--no-site-packages")
            .arg_opt(None::<&str>)
            .arg_opt(Some("--distribute"))
            .arg(".");
        assert_eq!(cmd.to_string(), "virtualenv --no-site-packages --distribute .");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = SystemRunner
            .capture(&CommandLine::new("setup-venv-no-such-program-4c1d"))
            .unwrap_err();
        assert!(matches!(err, VenvError::Spawn { .. }));
    }

    #[test]
    fn batch_wrappers_are_recognized() {
        assert!(is_batch_script(Path::new(r"C:\Python26\Scripts\virtualenv.bat")));
        assert!(is_batch_script(Path::new(r"C:\Python26\Scripts\PYPM.CMD")));
        assert!(!is_batch_script(Path::new(r"C:\Python26\Scripts\pip.exe")));
        assert!(!is_batch_script(Path::new("/usr/bin/virtualenv")));
    }

    #[cfg(windows)]
    #[test]
    fn batch_wrapper_on_path_runs_through_cmd() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("setup-venv-wrapper-test.bat");
        std::fs::write(&script, "@echo wrapped %1\r\n").unwrap();

        let out = SystemRunner
            .capture(&CommandLine::new(&script).arg("ok"))
            .unwrap();
        assert_eq!(out.trim(), "wrapped ok");
    }
}
