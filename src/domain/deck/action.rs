//! Input events and the actions they resolve to

use std::fmt;

use super::transform::TransformKind;

/// Discrete events delivered by the key matrix and rotary encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key in the given keymap slot was pressed
    KeyPressed(usize),
    /// The encoder moved by the given number of detents (sign is direction)
    EncoderRotated(i32),
}

impl InputEvent {
    /// Whether this event came from the key matrix
    pub const fn is_key(&self) -> bool {
        matches!(self, Self::KeyPressed(_))
    }
}

/// One resolved action, created per input event and discarded after dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRequest {
    /// Open the chat front-end of the current provider
    Open,
    /// Close the browser
    Close,
    /// Transform the clipboard content
    Transform(TransformKind),
    /// Switch to the provider with the given raw identifier
    SwitchProvider(String),
    /// Move the parameter by the given delta
    AdjustParameter(f64),
}

impl ActionRequest {
    /// Short name used in logs and session state
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Transform(kind) => kind.as_str(),
            Self::SwitchProvider(_) => "switch",
            Self::AdjustParameter(_) => "adjust",
        }
    }
}

impl fmt::Display for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchProvider(id) => write!(f, "switch:{}", id),
            Self::AdjustParameter(delta) => write!(f, "adjust:{:+}", delta),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Commands consumed by the deck event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckCommand {
    /// An input event to dispatch
    Input(InputEvent),
    /// Finish the in-flight action and stop
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(ActionRequest::Open.name(), "open");
        assert_eq!(
            ActionRequest::Transform(TransformKind::Expand).name(),
            "expand"
        );
        assert_eq!(ActionRequest::SwitchProvider("gpt".into()).name(), "switch");
    }

    #[test]
    fn display_includes_arguments() {
        assert_eq!(
            ActionRequest::SwitchProvider("gemini".into()).to_string(),
            "switch:gemini"
        );
        assert_eq!(ActionRequest::AdjustParameter(0.1).to_string(), "adjust:+0.1");
        assert_eq!(ActionRequest::Close.to_string(), "close");
    }

    #[test]
    fn key_events_are_keys() {
        assert!(InputEvent::KeyPressed(0).is_key());
        assert!(!InputEvent::EncoderRotated(1).is_key());
    }
}
