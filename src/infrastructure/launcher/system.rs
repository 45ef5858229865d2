//! Host process launcher using the `open` crate and `pkill`

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::application::ports::{LaunchError, ProcessLauncher};

/// pkill exit status when no process matched
const PKILL_NO_MATCH: i32 = 1;

/// Launcher for the host desktop
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    timeout: Duration,
}

impl SystemLauncher {
    /// Create a launcher bounding each call by `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn try_open(&self, url: &str) -> Result<(), LaunchError> {
        let target = url.to_owned();
        // open blocks until the opener has been spawned
        let spawned = tokio::task::spawn_blocking(move || open::that_detached(target));

        match timeout(self.timeout, spawned).await {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(e))) => Err(LaunchError::OpenFailed {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Ok(Err(e)) => Err(LaunchError::OpenFailed {
                url: url.to_string(),
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(LaunchError::TimedOut(format!("open {}", url))),
        }
    }

    async fn try_close(&self, name: &str) -> Result<bool, LaunchError> {
        let status = Command::new("pkill")
            .arg(name)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        let status = timeout(self.timeout, status)
            .await
            .map_err(|_| LaunchError::TimedOut(format!("pkill {}", name)))?
            .map_err(|e| LaunchError::CloseFailed {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        match status.code() {
            Some(0) => Ok(true),
            Some(PKILL_NO_MATCH) => Ok(false),
            _ => Err(LaunchError::CloseFailed {
                name: name.to_string(),
                message: format!("pkill exited with status: {}", status),
            }),
        }
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

#[async_trait]
impl ProcessLauncher for SystemLauncher {
    async fn open(&self, url: &str) {
        match self.try_open(url).await {
            Ok(()) => info!(url, "opened"),
            Err(e) => warn!(error = %e, "launch failed"),
        }
    }

    async fn close_named_process(&self, name: &str) {
        match self.try_close(name).await {
            Ok(true) => info!(name, "terminated"),
            Ok(false) => debug!(name, "no matching process"),
            Err(e) => warn!(error = %e, "close failed"),
        }
    }
}
