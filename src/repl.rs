use mysh::{Flow, Shell, ShellConfig};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::io::{self, Write};

// ============================================
// REPL main loop
// ============================================

/// Run the interactive session. Returns the exit status for the process.
pub(crate) fn run_repl(config: ShellConfig) -> RlResult<i32> {
    // Set up signal handlers for job control
    if let Err(e) = mysh::signals::setup_signal_handlers() {
        log::warn!("could not install signal handlers: {}", e);
    }

    let mut shell = Shell::new(config);

    if shell.config().clear_screen {
        shell.eval_line("clear");
    }

    // No history: lines are never added to the editor's history
    let mut rl = DefaultEditor::new()?;

    loop {
        if shell.service_signals() {
            // Ctrl+C while a foreground child ran; start a fresh line
            println!();
        }

        match rl.readline(&shell.prompt()) {
            Ok(line) => {
                if let Flow::Exit(code) = shell.eval_line(&line) {
                    return Ok(code);
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at the prompt: discard the line and prompt again
                shell.service_signals();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                let _ = io::stdout().flush();
                return Ok(0);
            }
            Err(e) => return Err(e),
        }
    }
}
