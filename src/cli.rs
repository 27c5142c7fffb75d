use mysh::{Flow, Shell, ShellConfig};
use std::fs;
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) config: ShellConfig,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--clear" => {
                cli.config.clear_screen = true;
            }
            "--prompt" => {
                i += 1;
                let prompt = args.get(i).ok_or("--prompt needs a value")?;
                cli.config.prompt = prompt.clone();
            }
            "--max-args" => {
                i += 1;
                let value = args.get(i).ok_or("--max-args needs a value")?;
                cli.config.arg_capacity = match value.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(format!("--max-args: invalid count '{}'", value)),
                };
            }
            "-c" => {
                // Everything after -c is the command
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
                return Err("-c needs a command".into());
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if path.starts_with('-') {
                    return Err(format!("unknown option '{}'", path));
                }
                cli.script = Some(path.to_string());
            }
        }
        i += 1;
    }

    Ok(cli)
}

pub(crate) fn print_help() {
    println!(
        r#"mysh-{} - a small interactive shell

USAGE:
    mysh                    Start interactive session
    mysh -c <command>       Execute a single command line
    mysh <script>           Execute each line of a file
    mysh --clear            Clear the screen before the first prompt
    mysh --prompt <text>    Prompt prefix (default: [mySHELL])
    mysh --max-args <n>     Arguments allowed per line (default: 10)
    mysh --help             Show this help message
    mysh --version          Show version

SYNTAX:
    cmd arg ...             Run cmd and wait for it
    cmd arg ... &           Run cmd in the background

BUILTINS:
    cd <path>               Change directory
    exit                    Leave the shell (background jobs keep running)
    killbg                  Send SIGINT to every background job

ENVIRONMENT:
    RUST_LOG=debug          Show diagnostic logging on stderr
"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("mysh-{}", VERSION);
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code.clamp(0, 255) as u8)
}

/// Execute a single command line
pub(crate) fn execute_command(cmd: &str, config: ShellConfig) -> ExitCode {
    let mut shell = Shell::new(config);

    match shell.try_eval_line(cmd) {
        Ok(outcome) => match outcome.flow() {
            Flow::Exit(code) => exit_code(code),
            Flow::Continue => ExitCode::SUCCESS,
        },
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute a script file, one command line per line
pub(crate) fn execute_script(path: &str, config: ShellConfig) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = mysh::signals::setup_signal_handlers() {
        log::warn!("could not install signal handlers: {}", e);
    }

    let mut shell = Shell::new(config);

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        shell.service_signals();
        match shell.try_eval_line(trimmed) {
            Ok(outcome) => {
                if let Flow::Exit(code) = outcome.flow() {
                    return exit_code(code);
                }
            }
            Err(e) => {
                log::debug!("{} line {} failed", path, line_num + 1);
                eprintln!("{}", e);
            }
        }
    }

    ExitCode::SUCCESS
}
