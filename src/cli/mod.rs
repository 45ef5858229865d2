//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! IPC and the deck daemon runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod daemon_app;
pub mod daemon_cmd;
pub mod ipc;
pub mod pid_file;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{build_deck, load_merged_config, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, DeckAction};
pub use daemon_app::run_daemon;
pub use daemon_cmd::handle_deck_command;
pub use presenter::Presenter;
