//! mysh - a small interactive shell
//!
//! # Overview
//!
//! mysh reads a line, splits it into a command and its arguments, and runs
//! it either as a builtin or as a child process. A trailing `&` runs the
//! command in the background, where it is tracked until it exits.
//!
//! ```text
//! [mySHELL] ls -la          # runs ls, waits for it
//! [mySHELL] sleep 30 &      # runs sleep, returns at once
//! [mySHELL] killbg          # SIGINT to every background job
//! [mySHELL] cd /tmp
//! [mySHELL] exit
//! ```
//!
//! # Signals
//!
//! SIGINT and SIGCHLD handlers only set flags. The read-eval loop calls
//! [`Shell::service_signals`] to reap finished children and learn whether
//! the prompt needs redrawing.
//!
//! # Example
//!
//! ```rust
//! use mysh::{lex, ProcessMode, DEFAULT_ARG_CAPACITY};
//!
//! let line = lex("sleep 5 &", DEFAULT_ARG_CAPACITY).unwrap();
//! assert_eq!(line.args, vec!["sleep", "5"]);
//! assert_eq!(line.mode, ProcessMode::Background);
//! ```

pub mod builtins;
pub mod executor;
pub mod jobs;
pub mod lexer;
pub mod shell;
pub mod signals;

// Re-export commonly used items
pub use builtins::{Builtin, BuiltinError, Flow};
pub use executor::{execute, ExecuteError, Launched};
pub use jobs::JobRegistry;
pub use lexer::{lex, LexError, ParsedLine, ProcessMode, DEFAULT_ARG_CAPACITY};
pub use shell::{Outcome, Shell, ShellConfig, ShellError};
