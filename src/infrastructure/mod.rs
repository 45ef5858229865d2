//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the clipboard, chat-completion endpoints,
//! the desktop and the config file.

pub mod clipboard;
pub mod config;
pub mod feedback;
pub mod gateway;
pub mod launcher;
pub mod text_io;

// Re-export adapters
pub use clipboard::{create_clipboard, ArboardClipboard, XclipClipboard};
pub use config::XdgConfigStore;
pub use feedback::{create_feedback, NotifyFeedback, TerminalFeedback};
pub use gateway::{ChatCompletionsGateway, MockGateway, ProviderRouter};
pub use launcher::SystemLauncher;
pub use text_io::ClipboardTextPort;
