//! Process launch port interface

use async_trait::async_trait;
use thiserror::Error;

/// Process launch errors, reported by adapters through logs only
#[derive(Debug, Clone, Error)]
pub enum LaunchError {
    #[error("Failed to open {url}: {message}")]
    OpenFailed { url: String, message: String },

    #[error("Failed to close {name}: {message}")]
    CloseFailed { name: String, message: String },

    #[error("{0} timed out")]
    TimedOut(String),
}

/// Port for launching and terminating external programs.
///
/// Fire-and-forget: the dispatcher does not consult any outcome.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Open a URL in the default browser
    async fn open(&self, url: &str);

    /// Terminate processes with the given name
    async fn close_named_process(&self, name: &str);
}

/// Blanket implementation for boxed launchers
#[async_trait]
impl ProcessLauncher for Box<dyn ProcessLauncher> {
    async fn open(&self, url: &str) {
        self.as_ref().open(url).await
    }

    async fn close_named_process(&self, name: &str) {
        self.as_ref().close_named_process(name).await
    }
}
