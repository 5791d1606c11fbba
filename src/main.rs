//! backoff CLI entry point

use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

use backoff_retry::cli::{parse_payload, run_command, Output};
use backoff_retry::telemetry::{init_telemetry, TelemetryConfig};
use backoff_retry::util::cmd::command_line;
use backoff_retry::RetryConfig;

#[derive(Parser)]
#[command(name = "backoff")]
#[command(author, version, about = "Retry a command with exponential backoff", long_about = None)]
struct Cli {
    /// YAML file with retry settings (flags override it)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Retries after the first attempt
    #[arg(short, long, env = "BACKOFF_ATTEMPTS")]
    attempts: Option<u32>,
    /// Wait before the first retry, in milliseconds
    #[arg(short, long = "delay-ms", env = "BACKOFF_DELAY_MS", value_name = "MS")]
    delay_ms: Option<u64>,
    /// Message logged on every failed attempt
    #[arg(short, long, env = "BACKOFF_MESSAGE")]
    message: Option<String>,
    /// Operation name used in log messages (default: the program name)
    #[arg(long)]
    name: Option<String>,
    /// Diagnostic context attached to every failure record
    #[arg(short, long = "payload", value_name = "KEY=VALUE")]
    payload: Vec<String>,
    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
    /// Command to run, after `--`
    #[arg(last = true, required = true, value_name = "COMMAND")]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut telemetry = if cli.verbose {
        TelemetryConfig::development()
    } else {
        TelemetryConfig::default()
    };
    telemetry.ansi_colors = std::io::stderr().is_terminal();
    let _guard = init_telemetry(&telemetry)?;

    let mut config = match cli.config {
        Some(ref path) => RetryConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RetryConfig::default(),
    };
    if let Some(attempts) = cli.attempts {
        config.attempts = attempts;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.delay_ms = delay_ms;
    }
    if cli.message.is_some() {
        config.error_message = cli.message;
    }
    if cli.name.is_some() {
        config.operation_name = cli.name;
    }
    config.validate()?;

    let payload = parse_payload(&cli.payload).map_err(anyhow::Error::msg)?;

    let (program, args) = cli
        .command
        .split_first()
        .context("No command given")?;
    let line = command_line(program, args);

    if config.operation_name.is_none() {
        config.operation_name = Some(program.clone());
    }
    let attempts = config.attempts;
    let options = config.into_options();

    if cli.verbose {
        Output::info(&format!(
            "Running {} with up to {} retries",
            Output::command(&line),
            attempts
        ));
    }

    match run_command(program, args, payload, &options).await {
        Ok(()) => {
            if cli.verbose {
                Output::success(&format!("{} succeeded", Output::command(&line)));
            }
            Ok(())
        }
        Err(err) => {
            Output::error(&err.to_string());
            std::process::exit(1);
        }
    }
}
