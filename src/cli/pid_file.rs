//! Single-instance guard for the deck daemon
//!
//! The file holds the decimal PID of the running deck. A file whose PID
//! no longer exists is treated as stale and replaced.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;
use tracing::{debug, warn};

/// Default PID file location
const DEFAULT_PID_PATH: &str = "/tmp/llmdeck.pid";

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another deck is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },

    #[error("Failed to remove PID file {path}: {source}")]
    RemoveFailed { path: PathBuf, source: io::Error },
}

/// PID file owned by the running deck; removed on drop
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_PID_PATH)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// PID of a live deck holding the file, if any.
    ///
    /// Clears the file when the recorded process is gone.
    pub fn owner(&self) -> Option<u32> {
        let pid = read_pid(&self.path)?;

        // Null signal: existence check only
        match kill(Pid::from_raw(pid as i32), None) {
            Ok(()) | Err(Errno::EPERM) => Some(pid),
            Err(Errno::ESRCH) => {
                debug!(pid, path = %self.path.display(), "removing stale PID file");
                let _ = fs::remove_file(&self.path);
                None
            }
            Err(e) => {
                warn!(pid, error = %e, "could not probe PID file owner");
                None
            }
        }
    }

    /// Claim the file for this process
    pub fn acquire(&self) -> Result<(), PidFileError> {
        if let Some(pid) = self.owner() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        let write_failed = |source| PidFileError::WriteFailed {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(write_failed)?;
        write!(file, "{}", process::id()).map_err(write_failed)?;

        debug!(path = %self.path.display(), "PID file acquired");
        Ok(())
    }

    pub fn release(&self) -> Result<(), PidFileError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PidFileError::RemoveFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

fn read_pid(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}
