//! X11 clipboard adapter using the xclip binary

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{Clipboard, ClipboardError};

/// X11 clipboard adapter shelling out to `xclip -selection clipboard`
#[derive(Debug, Default, Clone, Copy)]
pub struct XclipClipboard;

impl XclipClipboard {
    /// Create a new xclip clipboard adapter
    pub fn new() -> Self {
        Self
    }

    fn command() -> Command {
        let mut command = Command::new("xclip");
        command.args(["-selection", "clipboard"]).kill_on_drop(true);
        command
    }
}

fn spawn_error(e: std::io::Error, wrap: fn(String) -> ClipboardError) -> ClipboardError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ClipboardError::XclipNotFound
    } else {
        wrap(e.to_string())
    }
}

#[async_trait]
impl Clipboard for XclipClipboard {
    async fn read(&self) -> Result<String, ClipboardError> {
        let output = Self::command()
            .arg("-o")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| spawn_error(e, ClipboardError::ReadFailed))?;

        if !output.status.success() {
            return Err(ClipboardError::ReadFailed(format!(
                "xclip exited with status: {}",
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Self::command()
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(e, ClipboardError::CopyFailed))?;

        // Write text to stdin, then close it so xclip takes ownership
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::CopyFailed(format!(
                "xclip exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}
