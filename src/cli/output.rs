//! CLI output formatting
//!
//! Runner messages go to stderr so they never mix with the child's stdout.

use colored::Colorize;

/// Output helper for consistent CLI formatting
pub struct Output;

impl Output {
    /// Print a success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        eprintln!("{} {}", "ℹ".blue(), message);
    }

    /// Format a command line consistently
    pub fn command(line: &str) -> String {
        line.cyan().bold().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_keeps_text() {
        colored::control::set_override(false);
        assert_eq!(Output::command("sh -c true"), "sh -c true");
    }
}
