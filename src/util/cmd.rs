//! Command logging for the `backoff` runner.

use std::process::Command;
use tracing::debug;

/// Log a command just before it is spawned.
///
/// Emits a `tracing::debug!` event with the program name, arguments, and
/// working directory. Visible with `backoff -v` or via
/// `RUST_LOG=backoff_retry::cmd=debug`.
pub fn log_cmd(cmd: &Command) {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    let cwd = cmd
        .get_current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    debug!(
        target: "backoff_retry::cmd",
        %program,
        ?args,
        %cwd,
        "exec"
    );
}

/// Render a program and its arguments as a single display string.
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
