//! Desktop-notification feedback sink using notify-rust

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::ports::{FeedbackError, FeedbackSink};
use crate::domain::deck::Rgb;

const APP_NAME: &str = "LLMDeck";

/// Screen updates shown as desktop notifications.
///
/// Notifications have no indicator, so a flash only holds for its duration.
#[derive(Debug, Clone)]
pub struct NotifyFeedback {
    app_name: String,
}

impl NotifyFeedback {
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }
}

impl Default for NotifyFeedback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedbackSink for NotifyFeedback {
    #[cfg(all(unix, not(target_os = "macos")))]
    async fn init(&self) -> Result<(), FeedbackError> {
        let info = tokio::task::spawn_blocking(notify_rust::get_server_information)
            .await
            .map_err(|e| FeedbackError::DisplayUnavailable(format!("Task join error: {}", e)))?
            .map_err(|e| FeedbackError::DisplayUnavailable(e.to_string()))?;

        debug!(server = %info.name, version = %info.version, "notification server found");
        Ok(())
    }

    async fn show_status(&self, text: &str) {
        let (summary, body) = text.split_once('\n').unwrap_or((text, ""));
        let summary = summary.to_owned();
        let body = body.to_owned();
        let app_name = self.app_name.clone();

        // notify-rust operations can block, so run in spawn_blocking
        let shown = tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(&app_name)
                .summary(&summary)
                .body(&body)
                .show()
                .map(|_| ())
        })
        .await;

        match shown {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "notification failed"),
            Err(e) => warn!(error = %e, "notification task failed"),
        }
    }

    async fn flash(&self, color: Rgb, duration: Duration) {
        debug!(%color, "indicator");
        tokio::time::sleep(duration).await;
    }
}
