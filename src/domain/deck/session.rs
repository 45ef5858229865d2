//! Deck session phase machine

use std::fmt;
use thiserror::Error;

/// Dispatcher phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeckPhase {
    /// Showing "Ready", nothing pending
    #[default]
    Idle,
    /// An action is running its side effects
    Busy(&'static str),
    /// An action finished and its message is held until the revert fires
    Dwelling,
}

impl DeckPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Busy(_) => "busy",
            Self::Dwelling => "dwelling",
        }
    }
}

impl fmt::Display for DeckPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy(action) => write!(f, "busy ({})", action),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Error when an invalid phase transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_phase} state")]
pub struct InvalidStateTransition {
    pub current_phase: DeckPhase,
    pub action: String,
}

/// Deck session entity.
/// Guarantees at most one action in flight.
///
/// State machine:
///   IDLE -> BUSY (begin)
///   DWELLING -> BUSY (begin, the pending revert is cancelled by the caller)
///   BUSY -> DWELLING (hold)
///   BUSY -> IDLE (complete)
///   DWELLING -> IDLE (revert)
#[derive(Debug, Default)]
pub struct DeckSession {
    phase: DeckPhase,
}

impl DeckSession {
    /// Create a new session in idle phase
    pub fn new() -> Self {
        Self {
            phase: DeckPhase::Idle,
        }
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == DeckPhase::Idle
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, DeckPhase::Busy(_))
    }

    pub fn is_dwelling(&self) -> bool {
        self.phase == DeckPhase::Dwelling
    }

    /// Start an action. Fails if another action is in flight.
    pub fn begin(&mut self, action: &'static str) -> Result<(), InvalidStateTransition> {
        if self.is_busy() {
            return Err(InvalidStateTransition {
                current_phase: self.phase,
                action: format!("begin {}", action),
            });
        }
        self.phase = DeckPhase::Busy(action);
        Ok(())
    }

    /// Finish the action and hold its message until a revert
    pub fn hold(&mut self) -> Result<(), InvalidStateTransition> {
        if !self.is_busy() {
            return Err(InvalidStateTransition {
                current_phase: self.phase,
                action: "hold a message".to_string(),
            });
        }
        self.phase = DeckPhase::Dwelling;
        Ok(())
    }

    /// The held message expired
    pub fn revert(&mut self) -> Result<(), InvalidStateTransition> {
        if !self.is_dwelling() {
            return Err(InvalidStateTransition {
                current_phase: self.phase,
                action: "revert to ready".to_string(),
            });
        }
        self.phase = DeckPhase::Idle;
        Ok(())
    }
}
