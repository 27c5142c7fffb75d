//! Shell - the central coordinator for mysh
//!
//! The Shell owns the session state and runs the per-line pipeline:
//! 1. Tokenize (lexer)
//! 2. Dispatch builtins (builtins)
//! 3. Otherwise launch a child process (executor)
//!
//! Signal work (reaping, prompt redraw) is collected separately by
//! `service_signals`, which the driving loop calls between lines.

use crate::builtins::{Builtin, BuiltinError, Flow};
use crate::executor::{execute, ExecuteError, Launched};
use crate::jobs::JobRegistry;
use crate::lexer::{lex, LexError, DEFAULT_ARG_CAPACITY};
use crate::signals;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Builtin(#[from] BuiltinError),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

/// Default prompt prefix
pub const DEFAULT_PROMPT: &str = "[mySHELL]";

/// Session settings, built from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Printed (followed by a space) before each read
    pub prompt: String,
    /// Maximum number of arguments per line, command name included
    pub arg_capacity: usize,
    /// Run `clear` before the first prompt
    pub clear_screen: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            arg_capacity: DEFAULT_ARG_CAPACITY,
            clear_screen: false,
        }
    }
}

/// Result of evaluating one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to run
    Empty,
    Builtin(Builtin, Flow),
    Launched(Launched),
}

impl Outcome {
    pub fn flow(&self) -> Flow {
        match self {
            Outcome::Builtin(_, flow) => *flow,
            Outcome::Empty | Outcome::Launched(_) => Flow::Continue,
        }
    }
}

/// An interactive session
#[derive(Debug, Default)]
pub struct Shell {
    config: ShellConfig,
    jobs: JobRegistry,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Shell {
            config,
            jobs: JobRegistry::new(),
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Background jobs still running
    pub fn jobs(&self) -> &JobRegistry {
        &self.jobs
    }

    /// Prompt text shown before each read
    pub fn prompt(&self) -> String {
        format!("{} ", self.config.prompt)
    }

    /// Handle whatever the signal handlers flagged since the last call.
    ///
    /// Reaps terminated children if SIGCHLD fired. Returns true if SIGINT
    /// fired, in which case the caller redraws the prompt.
    pub fn service_signals(&self) -> bool {
        if signals::take_child_exit() {
            let reaped = signals::reap_children(&self.jobs);
            if !reaped.is_empty() {
                log::debug!("reaped {} child(ren)", reaped.len());
            }
        }
        signals::take_interrupt()
    }

    /// Evaluate one line, reporting errors on stderr.
    pub fn eval_line(&mut self, line: &str) -> Flow {
        match self.try_eval_line(line) {
            Ok(outcome) => outcome.flow(),
            Err(e) => {
                eprintln!("{}", e);
                Flow::Continue
            }
        }
    }

    /// Evaluate one line, handing errors back to the caller
    pub fn try_eval_line(&mut self, line: &str) -> Result<Outcome, ShellError> {
        let parsed = lex(line, self.config.arg_capacity)?;

        let Some(command) = parsed.command() else {
            return Ok(Outcome::Empty);
        };

        if let Some(builtin) = Builtin::from_name(command) {
            let flow = builtin.run(parsed.arguments(), &self.jobs)?;
            return Ok(Outcome::Builtin(builtin, flow));
        }

        let launched = execute(command, parsed.arguments(), parsed.mode, &self.jobs)?;
        if let Launched::Background(pid) = launched {
            log::debug!("[{}] {}", self.jobs.len(), pid);
        }
        Ok(Outcome::Launched(launched))
    }
}
