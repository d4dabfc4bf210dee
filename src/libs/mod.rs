// Building blocks of the provisioning workflow.

// Command-execution capability (`CommandRunner`) and `CommandLine`.
pub mod command_runner;
// Optional `setup-venv.yaml` loading.
pub mod config_loading;
// Sleep after creation on platforms whose virtualenv detaches.
pub mod creation_wait;
// `VenvError`, the crate's error type.
pub mod errors;
// Deleting files ignored by svn or git.
pub mod ignore_cleaner;
// System interpreter resolution.
pub mod interpreter;
// virtualenv invocation.
pub mod provisioner;
// Parks readline shims while virtualenv runs.
pub mod readline_guard;
// Per-run context: platform, runner, memoized PyPM probe.
pub mod session;
pub mod utilities;
// pywin32 linking for ActivePython environments.
pub mod vendor_packages;
