//! Builtin commands: `cd`, `exit`, `killbg`

use std::io;
use thiserror::Error;

use crate::jobs::JobRegistry;
use crate::signals;

#[derive(Error, Debug)]
pub enum BuiltinError {
    #[error("cd: {path}: No such file or directory")]
    DirectoryChangeFailed {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// What the read-eval loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// End the session with this status
    Exit(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Exit,
    KillBg,
}

impl Builtin {
    /// Look up a builtin by command name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cd" => Some(Builtin::Cd),
            "exit" => Some(Builtin::Exit),
            "killbg" => Some(Builtin::KillBg),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Cd => "cd",
            Builtin::Exit => "exit",
            Builtin::KillBg => "killbg",
        }
    }

    /// Run the builtin. `args` excludes the command name.
    pub fn run(&self, args: &[String], jobs: &JobRegistry) -> Result<Flow, BuiltinError> {
        match self {
            Builtin::Cd => builtin_cd(args),
            Builtin::Exit => Ok(builtin_exit(jobs)),
            Builtin::KillBg => {
                builtin_killbg(jobs);
                Ok(Flow::Continue)
            }
        }
    }
}

fn builtin_cd(args: &[String]) -> Result<Flow, BuiltinError> {
    let Some(path) = args.first() else {
        return Ok(Flow::Continue);
    };

    std::env::set_current_dir(path).map_err(|e| BuiltinError::DirectoryChangeFailed {
        path: path.clone(),
        source: e,
    })?;
    log::debug!("cd {}", path);
    Ok(Flow::Continue)
}

fn builtin_exit(jobs: &JobRegistry) -> Flow {
    let left = jobs.len();
    if left > 0 {
        eprintln!("exit: {} background job(s) left running", left);
    }
    Flow::Exit(0)
}

/// Interrupt every background job and empty the registry
pub fn builtin_killbg(jobs: &JobRegistry) -> usize {
    jobs.kill_all(|pid| match signals::interrupt_process(pid) {
        Ok(()) => log::debug!("killbg: sent SIGINT to {}", pid),
        // Already gone; the reaper will catch up
        Err(e) => log::debug!("killbg: {}", e),
    })
}
