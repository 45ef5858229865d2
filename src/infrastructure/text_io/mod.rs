//! Clipboard-backed text port with result-file persistence

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::application::ports::{Clipboard, TextIo, CLIPBOARD_PLACEHOLDER};

/// Text port reading and writing the system clipboard.
///
/// Every clipboard call is bounded by `timeout`; an elapsed call is
/// treated like any other clipboard failure.
pub struct ClipboardTextPort<C: Clipboard> {
    clipboard: C,
    timeout: Duration,
    result_path: PathBuf,
}

impl<C: Clipboard> ClipboardTextPort<C> {
    pub fn new(clipboard: C, timeout: Duration, result_path: impl Into<PathBuf>) -> Self {
        Self {
            clipboard,
            timeout,
            result_path: result_path.into(),
        }
    }

    /// File the last result is written to
    pub fn result_path(&self) -> &Path {
        &self.result_path
    }
}

#[async_trait]
impl<C: Clipboard> TextIo for ClipboardTextPort<C> {
    async fn read_external_text(&self) -> String {
        match timeout(self.timeout, self.clipboard.read()).await {
            Ok(Ok(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    debug!("clipboard empty");
                    CLIPBOARD_PLACEHOLDER.to_string()
                } else {
                    text.to_string()
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "clipboard read failed");
                CLIPBOARD_PLACEHOLDER.to_string()
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "clipboard read timed out");
                CLIPBOARD_PLACEHOLDER.to_string()
            }
        }
    }

    async fn write_external_text(&self, text: &str) -> bool {
        match timeout(self.timeout, self.clipboard.copy(text)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "clipboard write failed");
                false
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "clipboard write timed out");
                false
            }
        }
    }

    async fn persist(&self, text: &str) -> bool {
        match fs::write(&self.result_path, text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.result_path.display(), error = %e, "failed to write result file");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ClipboardError;
    use std::sync::Mutex;

    enum Behaviour {
        Text(&'static str),
        Fail,
        Hang,
    }

    struct FakeClipboard {
        behaviour: Behaviour,
        copied: Mutex<Option<String>>,
    }

    impl FakeClipboard {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                behaviour,
                copied: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Clipboard for FakeClipboard {
        async fn read(&self) -> Result<String, ClipboardError> {
            match self.behaviour {
                Behaviour::Text(text) => Ok(text.to_string()),
                Behaviour::Fail => Err(ClipboardError::ClipboardUnavailable("no display".into())),
                Behaviour::Hang => std::future::pending().await,
            }
        }

        async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
            match self.behaviour {
                Behaviour::Fail => Err(ClipboardError::CopyFailed("no display".into())),
                Behaviour::Hang => std::future::pending().await,
                Behaviour::Text(_) => {
                    *self.copied.lock().unwrap() = Some(text.to_string());
                    Ok(())
                }
            }
        }
    }

    fn port(behaviour: Behaviour) -> ClipboardTextPort<FakeClipboard> {
        ClipboardTextPort::new(
            FakeClipboard::new(behaviour),
            Duration::from_secs(3),
            std::env::temp_dir().join("llmdeck_text_io_unit.txt"),
        )
    }

    #[tokio::test]
    async fn read_trims_text() {
        let port = port(Behaviour::Text("  Hello world\n"));
        assert_eq!(port.read_external_text().await, "Hello world");
    }

    #[tokio::test]
    async fn blank_clipboard_reads_as_placeholder() {
        let port = port(Behaviour::Text(" \n\t"));
        assert_eq!(port.read_external_text().await, "No clipboard");
    }

    #[tokio::test]
    async fn failed_read_reads_as_placeholder() {
        let port = port(Behaviour::Fail);
        assert_eq!(port.read_external_text().await, "No clipboard");
        assert!(!port.write_external_text("x").await);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_clipboard_times_out() {
        let port = port(Behaviour::Hang);
        assert_eq!(port.read_external_text().await, "No clipboard");
        assert!(!port.write_external_text("x").await);
    }

    #[tokio::test]
    async fn write_reaches_clipboard() {
        let port = port(Behaviour::Text(""));
        assert!(port.write_external_text("result").await);
        assert_eq!(
            port.clipboard.copied.lock().unwrap().as_deref(),
            Some("result")
        );
    }

    #[tokio::test]
    async fn persist_overwrites_result_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let port = ClipboardTextPort::new(
            FakeClipboard::new(Behaviour::Text("")),
            Duration::from_secs(3),
            &path,
        );

        assert!(port.persist("first").await);
        assert!(port.persist("second").await);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[tokio::test]
    async fn persist_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let port = ClipboardTextPort::new(
            FakeClipboard::new(Behaviour::Text("")),
            Duration::from_secs(3),
            dir.path().join("missing").join("out.txt"),
        );
        assert!(!port.persist("text").await);
    }
}
