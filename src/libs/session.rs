// Per-invocation provisioning context.

use crate::cli::type_enums::Platform;
use crate::libs::command_runner::CommandRunner;
use crate::libs::utilities::platform::PlatformProfile;
use crate::schemas::environment::ProbeOutcome;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything the provisioning steps share for one run of the tool.
///
/// The vendor package manager probe is memoized here: it runs at most once per
/// session, however many packages get installed.
pub struct ProvisionSession<'a> {
    platform: Platform,
    runner: &'a dyn CommandRunner,
    home_dir: Option<PathBuf>,
    creation_wait: Duration,
    vendor_probe: OnceCell<ProbeOutcome>,
}

impl<'a> ProvisionSession<'a> {
    /// Creates a session for `platform`, using the current user's home directory
    /// and no post-creation wait.
    pub fn new(platform: Platform, runner: &'a dyn CommandRunner) -> Self {
        ProvisionSession {
            platform,
            runner,
            home_dir: dirs::home_dir(),
            creation_wait: Duration::ZERO,
            vendor_probe: OnceCell::new(),
        }
    }

    /// Overrides the home directory searched for readline shims.
    pub fn with_home_dir(mut self, home: Option<PathBuf>) -> Self {
        self.home_dir = home;
        self
    }

    pub fn with_creation_wait(mut self, wait: Duration) -> Self {
        self.creation_wait = wait;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn profile(&self) -> &'static PlatformProfile {
        self.platform.profile()
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner
    }

    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }

    pub fn creation_wait(&self) -> Duration {
        self.creation_wait
    }

    /// Returns the memoized probe result, running `probe` the first time only.
    pub fn vendor_probe(&self, probe: impl FnOnce() -> ProbeOutcome) -> ProbeOutcome {
        *self.vendor_probe.get_or_init(probe)
    }
}
