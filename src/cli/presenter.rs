//! CLI presenter for console output

use colored::*;

use crate::application::FlagOutput;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// One-line result of a flagging run
    pub fn summary(&self, output: &FlagOutput) {
        self.success(&Self::format_summary(output));
    }

    fn format_summary(output: &FlagOutput) -> String {
        let strategy = output
            .strategy
            .map_or("detection off", |s| s.label());
        format!(
            "{} ({}): {} break(s) [{}]",
            output.recording.path.display(),
            strategy,
            output.result.break_count,
            output.result.cutlist
        )
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
