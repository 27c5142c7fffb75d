//! Signal handling for mysh
//!
//! The handlers themselves only flip atomic flags:
//! - SIGINT (Ctrl+C): the prompt should be redrawn
//! - SIGCHLD: one or more children changed state and need reaping
//!
//! The main loop drains the flags with [`take_interrupt`] and
//! [`take_child_exit`] and does the actual work (printing, `waitpid`,
//! registry updates) outside of signal context.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::jobs::JobRegistry;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{kill, Signal};
#[cfg(unix)]
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
#[cfg(unix)]
use nix::unistd::Pid;

/// Set by the SIGINT handler
static SIGINT_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Set by the SIGCHLD handler
static SIGCHLD_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install the SIGINT and SIGCHLD handlers. They stay registered for the
/// life of the process.
#[cfg(unix)]
pub fn setup_signal_handlers() -> io::Result<()> {
    use signal_hook::consts::{SIGCHLD, SIGINT};
    use signal_hook::low_level;

    // Only atomic stores happen inside the handlers
    unsafe {
        low_level::register(SIGINT, || {
            SIGINT_RECEIVED.store(true, Ordering::SeqCst);
        })?;
        low_level::register(SIGCHLD, || {
            SIGCHLD_RECEIVED.store(true, Ordering::SeqCst);
        })?;
    }
    log::debug!("installed SIGINT and SIGCHLD handlers");
    Ok(())
}

/// Set up signal handlers (no-op on non-Unix)
#[cfg(not(unix))]
pub fn setup_signal_handlers() -> io::Result<()> {
    Ok(())
}

/// Check if SIGINT was received and clear the flag
pub fn take_interrupt() -> bool {
    SIGINT_RECEIVED.swap(false, Ordering::SeqCst)
}

/// Check if SIGCHLD was received and clear the flag
pub fn take_child_exit() -> bool {
    SIGCHLD_RECEIVED.swap(false, Ordering::SeqCst)
}

/// Reap every child that has already terminated and drop it from `jobs`.
///
/// SIGCHLD deliveries coalesce, so one wakeup may stand for several exits;
/// this keeps calling `waitpid` until nothing is left to collect. Returns
/// the reaped pids.
#[cfg(unix)]
pub fn reap_children(jobs: &JobRegistry) -> Vec<u32> {
    let mut reaped = Vec::new();
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => break,
            Ok(status) => {
                let Some(pid) = status.pid() else { break };
                let pid = pid.as_raw() as u32;
                let tracked = jobs.remove(pid);
                log::debug!("reaped {} ({:?}, tracked: {})", pid, status, tracked);
                reaped.push(pid);
            }
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => break,
            Err(e) => {
                log::warn!("waitpid failed: {}", e);
                break;
            }
        }
    }
    reaped
}

#[cfg(not(unix))]
pub fn reap_children(_jobs: &JobRegistry) -> Vec<u32> {
    Vec::new()
}

/// Send SIGINT to a process
#[cfg(unix)]
pub fn interrupt_process(pid: u32) -> Result<(), String> {
    let pid = Pid::from_raw(pid as i32);
    kill(pid, Signal::SIGINT).map_err(|e| format!("Failed to interrupt process {}: {}", pid, e))
}

#[cfg(not(unix))]
pub fn interrupt_process(_pid: u32) -> Result<(), String> {
    Err("Signal handling not supported on this platform".into())
}
