//! What happens to input that arrives while an action is in flight

use super::action::InputEvent;

/// Outcome of offering an event to the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Nothing in flight, run it now
    RunNow,
    /// Held until the in-flight action finishes
    Queued,
    /// Held, displacing the key press that was waiting
    Superseded(InputEvent),
    /// Encoder delta discarded while busy
    Dropped,
}

/// Busy-time input policy.
///
/// One pending key press, latest wins: a newer press replaces the waiting
/// one and the displaced event is reported back. Encoder deltas only make
/// sense against the value on screen, so they are dropped while busy.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Option<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide what to do with an incoming event
    pub fn offer(&mut self, event: InputEvent, busy: bool) -> Admission {
        if !busy {
            return Admission::RunNow;
        }

        match event {
            InputEvent::EncoderRotated(_) => Admission::Dropped,
            InputEvent::KeyPressed(_) => match self.pending.replace(event) {
                Some(previous) => Admission::Superseded(previous),
                None => Admission::Queued,
            },
        }
    }

    /// Take the waiting key press, if any
    pub fn pop(&mut self) -> Option<InputEvent> {
        self.pending.take()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
