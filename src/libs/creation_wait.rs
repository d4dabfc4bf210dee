// Crude wait for creation tools that detach from the console.
//
// On Windows virtualenv hands control back immediately and keeps working in the
// background. There is no handle to wait on, so we sleep. Ctrl-C during the
// sleep ends the wait early and provisioning carries on; Ctrl-C at any other
// time exits as usual.

use crate::{log_debug, log_info, log_warn};
use colored::Colorize;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Exit status for an interrupt outside of the wait.
const EXIT_SIGINT: i32 = 130;
const TICK: Duration = Duration::from_millis(100);

static WAITING: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static HANDLER: Once = Once::new();

fn install_handler() {
    HANDLER.call_once(|| {
        let installed = ctrlc::set_handler(|| {
            if WAITING.load(Ordering::SeqCst) {
                INTERRUPTED.store(true, Ordering::SeqCst);
            } else {
                std::process::exit(EXIT_SIGINT);
            }
        });
        if let Err(e) = installed {
            log_debug!("Could not install Ctrl-C handler: {}", e);
        }
    });
}

/// Sleeps for `duration`, returning early (and successfully) on Ctrl-C.
///
/// # Returns
/// * `true` if the full duration elapsed, `false` if the user interrupted it.
pub fn wait_for_detached_tool(duration: Duration) -> bool {
    if duration.is_zero() {
        return true;
    }
    install_handler();
    log_info!(
        "Waiting for virtualenv to finish ({} secs) ...",
        duration.as_secs().to_string().bold()
    );

    INTERRUPTED.store(false, Ordering::SeqCst);
    WAITING.store(true, Ordering::SeqCst);
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline && !INTERRUPTED.load(Ordering::SeqCst) {
        thread::sleep(TICK.min(deadline.saturating_duration_since(Instant::now())));
    }
    WAITING.store(false, Ordering::SeqCst);

    let interrupted = INTERRUPTED.swap(false, Ordering::SeqCst);
    if interrupted {
        log_warn!("Wait interrupted; continuing anyway");
    }
    !interrupted
}

/// Serializes tests that go through the process-wide wait flags.
#[cfg(test)]
pub(crate) fn serialize_waits() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
