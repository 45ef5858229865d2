//! Domain error types

use thiserror::Error;

/// Error when an unknown provider identifier is parsed
#[derive(Debug, Clone, Error)]
#[error("Invalid provider: \"{input}\". Valid providers are: gpt, gemini, llama")]
pub struct InvalidProviderError {
    pub input: String,
}

/// Error when an unknown transform kind is parsed
#[derive(Debug, Clone, Error)]
#[error("Invalid transform: \"{input}\". Valid transforms are: summarize, expand, humanize")]
pub struct InvalidTransformError {
    pub input: String,
}

/// Error when a keymap binding cannot be parsed
#[derive(Debug, Clone, Error)]
pub enum InvalidBindingError {
    #[error("Unknown binding \"{binding}\" in slot {slot}. Expected open, close, summarize, expand, humanize, switch:<provider> or none")]
    UnknownAction { slot: usize, binding: String },

    #[error("Keymap has {count} bindings, at most {max} slots are available")]
    TooManySlots { count: usize, max: usize },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
