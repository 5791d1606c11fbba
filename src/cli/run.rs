//! Run an external command under the backoff retrier.

use serde_json::Value;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

use crate::util::cmd::log_cmd;
use crate::util::retry::{retry_with_backoff, Payload, RetryError, RetryOptions};

/// Why a single run of the command failed
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("exited with status {0}")]
    ExitCode(i32),

    #[error("terminated by signal")]
    Signal,
}

/// Build a payload from `KEY=VALUE` entries.
///
/// Values that parse as JSON keep their type, anything else is a string.
/// Later entries overwrite earlier ones with the same key.
pub fn parse_payload(entries: &[String]) -> Result<Payload, String> {
    let mut payload = Payload::new();
    for entry in entries {
        let (key, raw) = entry
            .split_once('=')
            .ok_or_else(|| format!("invalid payload entry '{}': expected KEY=VALUE", entry))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("invalid payload entry '{}': empty key", entry));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        payload.insert(key.to_string(), value);
    }
    Ok(payload)
}

/// Run `program` with `args`, retrying with backoff until it exits zero.
///
/// The child inherits stdin, stdout and stderr.
pub async fn run_command(
    program: &str,
    args: &[String],
    payload: Payload,
    options: &RetryOptions,
) -> Result<(), RetryError<CommandError>> {
    retry_with_backoff(
        || async move {
            let mut cmd = Command::new(program);
            cmd.args(args)
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
            log_cmd(cmd.as_std());

            let status = cmd.status().await.map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

            if status.success() {
                Ok(())
            } else {
                Err(status.code().map_or(CommandError::Signal, CommandError::ExitCode))
            }
        },
        payload,
        options,
    )
    .await
}
