//! CLI presenter for output formatting

use colored::*;

use crate::domain::deck::{PARAMETER_MAX, PARAMETER_MIN};

const GAUGE_WIDTH: usize = 20;

/// Presenter for CLI output formatting
#[derive(Debug, Default, Clone, Copy)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print deck lifecycle status
    pub fn deck_status(&self, state: &str) {
        eprintln!("{} Deck: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format the parameter as a bar gauge
    pub fn format_parameter(&self, parameter: f64) -> String {
        let span = PARAMETER_MAX - PARAMETER_MIN;
        let ratio = ((parameter - PARAMETER_MIN) / span).clamp(0.0, 1.0);
        let filled = (ratio * GAUGE_WIDTH as f64).round() as usize;
        let empty = GAUGE_WIDTH - filled;

        format!(
            "[{}{}] {:.1}",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            parameter
        )
    }
}
