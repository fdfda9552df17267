//! CLI console utilities

use console::style;

/// Styled status output
///
/// Status lines go to stderr so stdout carries only the conversation and
/// command output.
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", style("ℹ").blue().bold(), message);
        }
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", style("✓").green().bold(), style(message).green());
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), style(message).red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        eprintln!();
        eprintln!("{}", style(title).bold().underlined());
        eprintln!("{}", style("=".repeat(title.chars().count())).dim());
    }
}
