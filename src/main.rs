//! Aurornis binary entry point.

use std::process::ExitCode;

use aurornis::cli::{self, Args};
use aurornis::config::Config;
use aurornis::{execute_async, logging, AurornisError, ExecutionResult};
use tracing::{debug, error};

/// Exit status when the command cannot be launched (shell convention).
const EXIT_NOT_LAUNCHED: u8 = 127;
/// Exit status for usage and configuration errors.
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'aurornis --help' for more information.");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    // Logs go to stderr; a second subscriber is not an error worth reporting
    let _ = logging::init_with_level(Some(config.log_filter()));

    if args.command.is_empty() {
        eprintln!("error: no command given");
        eprintln!("Try 'aurornis --help' for more information.");
        return ExitCode::from(EXIT_USAGE);
    }

    run(&args, &config).await
}

async fn run(args: &Args, config: &Config) -> ExitCode {
    let mut options = config.to_options();
    if !args.stdin_lines.is_empty() {
        options = options.stdin_lines(args.stdin_lines.iter().cloned());
    }
    debug!(?options, "execution options");

    match execute_async(args.command.iter().cloned(), &options).await {
        Ok(result) => {
            if let Err(e) = print_result(&result, args.json) {
                error!("failed to print result: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::from(exit_status(result.exit_code()))
        }
        Err(e @ AurornisError::Spawn { .. }) => {
            eprintln!("error: {}", e);
            ExitCode::from(EXIT_NOT_LAUNCHED)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_result(result: &ExecutionResult, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result);
        println!("duration: {}us", result.exec_time_us());
    }
    Ok(())
}

/// Map a child exit code to our own status; signals become 128 + signal.
fn exit_status(code: i32) -> u8 {
    match code {
        0..=255 => code as u8,
        -255..=-1 => (128 + (-code)).min(255) as u8,
        _ => 1,
    }
}
