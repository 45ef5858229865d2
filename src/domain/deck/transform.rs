//! Transform kinds and their instruction templates

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidTransformError;

const SUMMARIZE_INSTRUCTION: &str =
    "Summarize this text concisely (without sacrificing clarity) -->";

const EXPAND_INSTRUCTION: &str =
    "Expand and elaborate on this text (without sacrificing clarity) -->";

const HUMANIZE_INSTRUCTION: &str =
    "Rewrite this text to sound more human, real, and natural (without sacrificing clarity) --> ";

/// Clipboard transformations bound to the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Summarize,
    Expand,
    Humanize,
}

impl TransformKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Expand => "expand",
            Self::Humanize => "humanize",
        }
    }

    /// Title-cased name used for the busy status ("Summarize...")
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Summarize => "Summarize",
            Self::Expand => "Expand",
            Self::Humanize => "Humanize",
        }
    }

    /// Instruction sent to the provider ahead of the clipboard content
    pub const fn instruction(&self) -> &'static str {
        match self {
            Self::Summarize => SUMMARIZE_INSTRUCTION,
            Self::Expand => EXPAND_INSTRUCTION,
            Self::Humanize => HUMANIZE_INSTRUCTION,
        }
    }

    /// Status shown while the transform is in flight
    pub fn busy_status(&self) -> String {
        format!("{}...", self.title())
    }
}

impl FromStr for TransformKind {
    type Err = InvalidTransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summarize" => Ok(Self::Summarize),
            "expand" => Ok(Self::Expand),
            "humanize" => Ok(Self::Humanize),
            _ => Err(InvalidTransformError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
