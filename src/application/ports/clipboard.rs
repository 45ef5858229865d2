//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("xclip not found. Please install xclip.")]
    XclipNotFound,

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

/// Port for raw clipboard access
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Read the current clipboard text.
    async fn read(&self) -> Result<String, ClipboardError>;

    /// Copy text to the system clipboard.
    ///
    /// # Arguments
    /// * `text` - The text to copy
    async fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl Clipboard for Box<dyn Clipboard> {
    async fn read(&self) -> Result<String, ClipboardError> {
        self.as_ref().read().await
    }

    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().copy(text).await
    }
}
