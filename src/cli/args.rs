//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::FeedbackKind;
use crate::domain::deck::{ProviderId, KEY_SLOTS};

/// LLMDeck - macro keypad for transforming clipboard text with LLMs
#[derive(Parser, Debug)]
#[command(name = "llmdeck")]
#[command(version)]
#[command(about = "Macro keypad controller: summarize, expand or humanize clipboard text with a selectable LLM")]
#[command(long_about = None)]
pub struct Cli {
    /// Read key presses from stdin (1-9 press a key, + and - turn the encoder)
    #[arg(long)]
    pub stdin: bool,

    /// Provider selected at startup
    #[arg(short = 'p', long, value_name = "PROVIDER")]
    pub provider: Option<ProviderArg>,

    /// Parameter change per encoder detent
    #[arg(short = 's', long, value_name = "STEP")]
    pub step: Option<f64>,

    /// Where the screen and indicator are shown
    #[arg(short = 'f', long, value_name = "KIND")]
    pub feedback: Option<FeedbackArg>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Press a key on the running deck
    Press {
        /// Key slot (0-8)
        #[arg(value_parser = clap::value_parser!(u8).range(0..KEY_SLOTS as i64))]
        slot: u8,
    },
    /// Turn the encoder of the running deck
    Rotate {
        /// Detents, negative to turn down
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Show the state of the running deck
    Status,
}

/// Deck control actions sent over IPC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckAction {
    Press(u8),
    Rotate(i32),
    Status,
}

impl DeckAction {
    /// Wire form of the command
    pub fn command(&self) -> String {
        match self {
            Self::Press(slot) => format!("key {}", slot),
            Self::Rotate(delta) => format!("encoder {}", delta),
            Self::Status => "status".to_string(),
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Provider argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Gpt,
    Gemini,
    Llama,
}

impl From<ProviderArg> for ProviderId {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gpt => ProviderId::Gpt,
            ProviderArg::Gemini => ProviderId::Gemini,
            ProviderArg::Llama => ProviderId::Llama,
        }
    }
}

/// Feedback argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FeedbackArg {
    Terminal,
    Notify,
}

impl From<FeedbackArg> for FeedbackKind {
    fn from(arg: FeedbackArg) -> Self {
        match arg {
            FeedbackArg::Terminal => FeedbackKind::Terminal,
            FeedbackArg::Notify => FeedbackKind::Notify,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "provider",
    "parameter",
    "parameter_step",
    "dwell_unit_ms",
    "flash_ms",
    "clipboard_timeout_ms",
    "gateway_timeout_ms",
    "launch_timeout_ms",
    "clipboard_tool",
    "feedback",
    "result_path",
    "browser_process",
    "keymap",
    "api.endpoint",
    "api.api_key",
    "api.model",
    "providers.gpt",
    "providers.gemini",
    "providers.llama",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
