//! Feedback sink port interface

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::deck::Rgb;

/// Feedback errors
#[derive(Debug, Clone, Error)]
pub enum FeedbackError {
    #[error("Display unavailable: {0}")]
    DisplayUnavailable(String),

    #[error("Indicator unavailable: {0}")]
    IndicatorUnavailable(String),
}

/// Port for the status display and indicator LEDs.
///
/// Rendering failures after startup are the adapter's concern; the
/// dispatcher never sees them.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Check the display and indicator are usable. Called once at startup.
    async fn init(&self) -> Result<(), FeedbackError> {
        Ok(())
    }

    /// Render a text blob on the display
    async fn show_status(&self, text: &str);

    /// Fill the indicator with a color, hold it, then clear it
    async fn flash(&self, color: Rgb, duration: Duration);
}

/// Blanket implementation for boxed feedback sinks
#[async_trait]
impl FeedbackSink for Box<dyn FeedbackSink> {
    async fn init(&self) -> Result<(), FeedbackError> {
        self.as_ref().init().await
    }

    async fn show_status(&self, text: &str) {
        self.as_ref().show_status(text).await
    }

    async fn flash(&self, color: Rgb, duration: Duration) {
        self.as_ref().flash(color, duration).await
    }
}
