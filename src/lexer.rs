//! Tokenization for mysh
//!
//! A line is split on whitespace into an argument vector. A trailing `&`
//! (either a token of its own or a suffix of the last word) marks the line
//! for background execution.

use nom::{
    bytes::complete::{take_till1, take_while},
    combinator::all_consuming,
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};
use thiserror::Error;

/// Character that sends a command to the background
pub const BACKGROUND_MARKER: char = '&';

/// Number of argument slots when nothing else is configured
pub const DEFAULT_ARG_CAPACITY: usize = 10;

/// Whether the shell waits for a command or tracks it as a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessMode {
    #[default]
    Foreground,
    Background,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("too many arguments: {count} given, at most {capacity} allowed")]
    ArgumentOverflow { count: usize, capacity: usize },
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// One tokenized input line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    /// Argument vector; `args[0]` is the command name
    pub args: Vec<String>,
    pub mode: ProcessMode,
}

impl ParsedLine {
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The command name, if the line has one
    pub fn command(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Arguments after the command name
    pub fn arguments(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }
}

/// Skip any run of whitespace
fn space(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

/// Parse one whitespace-delimited word
fn word(input: &str) -> IResult<&str, &str> {
    preceded(space, take_till1(char::is_whitespace))(input)
}

/// Parse a whole line into its words
fn words(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(terminated(many0(word), space))(input)
}

/// Tokenize a line into an argument vector and process mode.
///
/// Scanning stops at the first word ending in `&`; anything after it is
/// ignored. Fails with [`LexError::ArgumentOverflow`] when more than
/// `capacity` arguments remain.
pub fn lex(input: &str, capacity: usize) -> Result<ParsedLine, LexError> {
    let (_, tokens) = words(input).map_err(|e| LexError::ParseError(e.to_string()))?;

    let mut line = ParsedLine::default();
    for token in tokens {
        if let Some(stripped) = token.strip_suffix(BACKGROUND_MARKER) {
            if !stripped.is_empty() {
                line.args.push(stripped.to_string());
            }
            line.mode = ProcessMode::Background;
            break;
        }
        line.args.push(token.to_string());
    }

    if line.args.len() > capacity {
        return Err(LexError::ArgumentOverflow {
            count: line.args.len(),
            capacity,
        });
    }

    Ok(line)
}
