//! mysh - a small interactive shell
//!
//! Usage:
//!   mysh              Start interactive session
//!   mysh -c "cmd"     Execute a single command line
//!   mysh script       Execute a script file

mod cli;
mod repl;

use cli::{execute_command, execute_script, parse_args, print_help, print_version};
use repl::run_repl;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("mysh: {}", e);
            eprintln!("Try 'mysh --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    if let Some(cmd) = cli.command {
        return execute_command(&cmd, cli.config);
    }

    if let Some(script) = cli.script {
        return execute_script(&script, cli.config);
    }

    match run_repl(cli.config) {
        Ok(code) => ExitCode::from(code.clamp(0, 255) as u8),
        Err(e) => {
            eprintln!("REPL error: {}", e);
            ExitCode::FAILURE
        }
    }
}
