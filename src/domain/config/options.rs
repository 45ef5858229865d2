//! Enumerated config choices

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConfigError;

/// How a provider's requests are served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayMode {
    /// Deterministic offline response derived from the instruction
    Mock,
    /// HTTP chat-completions call
    Live,
    /// Not configured; transforms yield the "No LLM selected" sentinel
    Off,
}

impl GatewayMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Live => "live",
            Self::Off => "off",
        }
    }
}

impl FromStr for GatewayMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "live" => Ok(Self::Live),
            "off" | "none" => Ok(Self::Off),
            _ => Err(invalid("providers", s, "mock, live, off")),
        }
    }
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clipboard backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardTool {
    /// Cross-platform arboard library
    #[default]
    Arboard,
    /// X11 xclip binary
    Xclip,
}

impl ClipboardTool {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arboard => "arboard",
            Self::Xclip => "xclip",
        }
    }
}

impl FromStr for ClipboardTool {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arboard" => Ok(Self::Arboard),
            "xclip" => Ok(Self::Xclip),
            _ => Err(invalid("clipboard_tool", s, "arboard, xclip")),
        }
    }
}

impl fmt::Display for ClipboardTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the screen and indicator are rendered on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackKind {
    /// Status line and colored indicator on stderr
    #[default]
    Terminal,
    /// Desktop notifications
    Notify,
}

impl FeedbackKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Notify => "notify",
        }
    }
}

impl FromStr for FeedbackKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "terminal" => Ok(Self::Terminal),
            "notify" => Ok(Self::Notify),
            _ => Err(invalid("feedback", s, "terminal, notify")),
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn invalid(key: &str, value: &str, valid: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Invalid value '{}'. Valid options: {}", value, valid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_gateway_modes() {
        assert_eq!("mock".parse::<GatewayMode>().unwrap(), GatewayMode::Mock);
        assert_eq!("LIVE".parse::<GatewayMode>().unwrap(), GatewayMode::Live);
        assert_eq!("none".parse::<GatewayMode>().unwrap(), GatewayMode::Off);
        assert!("remote".parse::<GatewayMode>().is_err());
    }

    #[test]
    fn parse_clipboard_tools() {
        assert_eq!("xclip".parse::<ClipboardTool>().unwrap(), ClipboardTool::Xclip);
        assert!("wl-copy".parse::<ClipboardTool>().is_err());
        assert_eq!(ClipboardTool::default(), ClipboardTool::Arboard);
    }

    #[test]
    fn parse_feedback_kinds() {
        assert_eq!("notify".parse::<FeedbackKind>().unwrap(), FeedbackKind::Notify);
        let err = "oled".parse::<FeedbackKind>().unwrap_err();
        assert!(err.to_string().contains("terminal, notify"));
    }
}
