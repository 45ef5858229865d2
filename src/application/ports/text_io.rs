//! Text I/O port interface

use async_trait::async_trait;

/// Substituted for clipboard content that cannot be read
pub const CLIPBOARD_PLACEHOLDER: &str = "No clipboard";

/// Port for the external text buffer and result persistence.
///
/// None of these calls fail: reads degrade to [`CLIPBOARD_PLACEHOLDER`],
/// writes report success as a flag.
#[async_trait]
pub trait TextIo: Send + Sync {
    /// Read the external text buffer, or the placeholder on any error
    async fn read_external_text(&self) -> String;

    /// Replace the external text buffer. Returns whether it succeeded.
    async fn write_external_text(&self, text: &str) -> bool;

    /// Write the result to durable storage. Returns whether it succeeded.
    async fn persist(&self, text: &str) -> bool;
}

/// Blanket implementation for boxed text ports
#[async_trait]
impl TextIo for Box<dyn TextIo> {
    async fn read_external_text(&self) -> String {
        self.as_ref().read_external_text().await
    }

    async fn write_external_text(&self, text: &str) -> bool {
        self.as_ref().write_external_text(text).await
    }

    async fn persist(&self, text: &str) -> bool {
        self.as_ref().persist(text).await
    }
}
