//! Executor: runs external programs as child processes

use std::io;
use std::process::{Command, ExitStatus};
use thiserror::Error;

use crate::jobs::JobRegistry;
use crate::lexer::ProcessMode;

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("{0}: command not found")]
    CommandNotFound(String),
    #[error("{command}: failed to create process: {source}")]
    ProcessCreationFailed {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("{command}: failed to wait for process: {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// What happened to a launched command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launched {
    /// Ran to completion; the shell does not act on the status
    Foreground(ExitStatus),
    /// Still running, tracked in the job registry under this pid
    Background(u32),
}

impl Launched {
    pub fn pid(&self) -> Option<u32> {
        match self {
            Launched::Background(pid) => Some(*pid),
            Launched::Foreground(_) => None,
        }
    }
}

/// Classify a spawn failure
fn spawn_error(command: &str, err: io::Error) -> ExecuteError {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            ExecuteError::CommandNotFound(command.to_string())
        }
        _ => ExecuteError::ProcessCreationFailed {
            command: command.to_string(),
            source: err,
        },
    }
}

/// Run `command` with `args` in a new process.
///
/// The child inherits the environment, working directory and standard
/// streams. In the foreground this blocks until the child exits; in the
/// background the pid goes into `jobs` and control returns right away.
pub fn execute(
    command: &str,
    args: &[String],
    mode: ProcessMode,
    jobs: &JobRegistry,
) -> Result<Launched, ExecuteError> {
    let mut child = Command::new(command)
        .args(args)
        .spawn()
        .map_err(|e| spawn_error(command, e))?;

    let pid = child.id();
    log::debug!("spawned {} as pid {} ({:?})", command, pid, mode);

    match mode {
        ProcessMode::Foreground => {
            let status = child.wait().map_err(|e| ExecuteError::WaitFailed {
                command: command.to_string(),
                source: e,
            })?;
            log::debug!("foreground pid {} exited: {}", pid, status);
            Ok(Launched::Foreground(status))
        }
        ProcessMode::Background => {
            // Dropping the handle leaves the child running; the SIGCHLD
            // path reaps it later.
            drop(child);
            jobs.insert(pid);
            Ok(Launched::Background(pid))
        }
    }
}
