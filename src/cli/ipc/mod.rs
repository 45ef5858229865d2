//! IPC (Inter-Process Communication) module for deck control
//!
//! Line protocol, one request per connection:
//! - `key N` presses the key in slot N
//! - `encoder D` turns the encoder by D detents
//! - `status` reports the current screen state
//!
//! Replies are `ok`, `ok: <note>` when the deck was busy, `error: <reason>`
//! or the status line.

mod unix_socket;

pub use unix_socket::{SocketPath, UnixSocketClient, UnixSocketServer};

use std::io;

use tokio::sync::watch;

use crate::application::DeckHandle;
use crate::domain::deck::{Admission, DeviceSnapshot, InputEvent};

/// A parsed IPC request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcRequest {
    Input(InputEvent),
    Status,
}

/// Parse one request line
pub fn parse_request(line: &str) -> Result<IpcRequest, String> {
    let mut parts = line.split_whitespace();
    let request = match (parts.next(), parts.next(), parts.next()) {
        (Some("status"), None, None) => IpcRequest::Status,
        (Some("key"), Some(slot), None) => {
            let slot = slot
                .parse::<usize>()
                .map_err(|_| format!("invalid key slot '{}'", slot))?;
            IpcRequest::Input(InputEvent::KeyPressed(slot))
        }
        (Some("encoder"), Some(delta), None) => {
            let delta = delta
                .parse::<i32>()
                .map_err(|_| format!("invalid encoder delta '{}'", delta))?;
            IpcRequest::Input(InputEvent::EncoderRotated(delta))
        }
        _ => return Err("unknown command".to_string()),
    };
    Ok(request)
}

/// Reply line for an admission outcome
pub fn admission_reply(admission: Admission) -> String {
    match admission {
        Admission::RunNow => "ok".to_string(),
        Admission::Queued => "ok: queued".to_string(),
        Admission::Superseded(InputEvent::KeyPressed(slot)) => {
            format!("ok: queued, replaced key {}", slot)
        }
        Admission::Superseded(previous) => format!("ok: queued, replaced {:?}", previous),
        Admission::Dropped => "ok: dropped, deck busy".to_string(),
    }
}

/// Trait for IPC servers that listen for deck commands
#[async_trait::async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept and handle connections
    ///
    /// Input requests are submitted to the deck; status requests are
    /// answered from the latest snapshot.
    async fn run(
        &self,
        deck: DeckHandle,
        snapshots: watch::Receiver<DeviceSnapshot>,
    ) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send commands to the deck
#[async_trait::async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if the deck appears to be running (endpoint exists)
    fn is_deck_running(&self) -> bool;

    /// Send a command and receive response
    async fn send_command(&self, cmd: &str) -> io::Result<String>;
}

/// Create the IPC server for the current platform
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(SocketPath::new()))
}

/// Create the IPC client for the current platform
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(SocketPath::new()))
}
