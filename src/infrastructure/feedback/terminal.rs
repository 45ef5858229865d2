//! Terminal feedback sink
//!
//! Renders the two-line screen and the indicator on stderr.

use std::io::{self, Write};
use std::time::Duration;

use async_trait::async_trait;
use colored::Colorize;

use crate::application::ports::{FeedbackError, FeedbackSink};
use crate::domain::deck::Rgb;

/// Screen and indicator drawn on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalFeedback;

impl TerminalFeedback {
    pub fn new() -> Self {
        Self
    }

    /// Screen blob as terminal lines, framed like the device display
    fn frame(text: &str) -> String {
        text.lines()
            .map(|line| format!("{} {}", "│".dimmed(), line.bold()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl FeedbackSink for TerminalFeedback {
    async fn init(&self) -> Result<(), FeedbackError> {
        let mut stderr = io::stderr().lock();
        stderr
            .flush()
            .map_err(|e| FeedbackError::DisplayUnavailable(e.to_string()))
    }

    async fn show_status(&self, text: &str) {
        eprintln!("{}", Self::frame(text));
    }

    async fn flash(&self, color: Rgb, duration: Duration) {
        let Rgb(r, g, b) = color;
        let label = color.role().map_or_else(|| color.to_string(), String::from);
        eprintln!("{} {}", "●".truecolor(r, g, b), label.truecolor(r, g, b));
        tokio::time::sleep(duration).await;
    }
}
