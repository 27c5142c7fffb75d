//! Common test utilities for mysh integration tests

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

pub use mysh::{signals, JobRegistry, Launched, Outcome, Shell, ShellConfig};

/// `waitpid(-1)` collects any child of the test process, so tests that
/// spawn or reap children take this lock first.
static CHILDREN: Mutex<()> = Mutex::new(());

pub fn serial() -> MutexGuard<'static, ()> {
    CHILDREN.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Helper to run a line and return the background pid it started
#[allow(dead_code)]
pub fn spawn_background(shell: &mut Shell, line: &str) -> u32 {
    match shell.try_eval_line(line).unwrap() {
        Outcome::Launched(Launched::Background(pid)) => pid,
        other => panic!("{:?} did not launch a background job: {:?}", line, other),
    }
}

/// Reap repeatedly until `done` holds or `timeout` passes. Returns every
/// pid reaped along the way.
#[allow(dead_code)]
pub fn reap_until<F>(jobs: &JobRegistry, timeout: Duration, mut done: F) -> Vec<u32>
where
    F: FnMut(&[u32]) -> bool,
{
    let start = Instant::now();
    let mut reaped = Vec::new();
    loop {
        reaped.extend(signals::reap_children(jobs));
        if done(&reaped) || start.elapsed() > timeout {
            return reaped;
        }
        thread::sleep(Duration::from_millis(20));
    }
}
