//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod feedback;
pub mod gateway;
pub mod launcher;
pub mod text_io;

// Re-export common types
pub use clipboard::{Clipboard, ClipboardError};
pub use config::ConfigStore;
pub use feedback::{FeedbackError, FeedbackSink};
pub use gateway::{GatewayError, ProviderGateway};
pub use launcher::{LaunchError, ProcessLauncher};
pub use text_io::{TextIo, CLIPBOARD_PLACEHOLDER};
