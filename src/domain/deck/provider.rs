//! Provider identifier value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidProviderError;

/// All selectable providers, in keypad order
pub const ALL_PROVIDERS: &[ProviderId] = &[ProviderId::Gpt, ProviderId::Gemini, ProviderId::Llama];

/// Text-transformation backends the deck can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderId {
    #[default]
    Gpt,
    Gemini,
    Llama,
}

impl ProviderId {
    /// Lowercase identifier used in config files and keymap bindings
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt => "gpt",
            Self::Gemini => "gemini",
            Self::Llama => "llama",
        }
    }

    /// Uppercase label shown on the screen
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gpt => "GPT",
            Self::Gemini => "GEMINI",
            Self::Llama => "LLAMA",
        }
    }

    /// Vendor name used in generated and error texts
    pub const fn vendor(&self) -> &'static str {
        match self {
            Self::Gpt => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Llama => "Llama",
        }
    }

    /// Chat front-end opened by the open action
    pub const fn chat_url(&self) -> &'static str {
        match self {
            Self::Gpt => "https://chatgpt.com",
            Self::Gemini => "https://gemini.google.com",
            Self::Llama => "https://www.meta.ai",
        }
    }
}

/// Chat URL for a raw identifier, falling back to the GPT front-end
pub fn chat_url_for(id: &str) -> &'static str {
    id.parse::<ProviderId>()
        .unwrap_or(ProviderId::Gpt)
        .chat_url()
}

impl FromStr for ProviderId {
    type Err = InvalidProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt" => Ok(Self::Gpt),
            "gemini" => Ok(Self::Gemini),
            "llama" => Ok(Self::Llama),
            _ => Err(InvalidProviderError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
