//! Configuration domain module

mod app_config;
mod options;

pub use app_config::*;
pub use options::{ClipboardTool, FeedbackKind, GatewayMode};
