//! Application layer - Use cases and port interfaces
//!
//! Contains the action dispatcher, the event loop feeding it, and
//! the trait definitions for external system interactions.

pub mod dispatcher;
pub mod event_loop;
pub mod ports;

// Re-export use cases
pub use dispatcher::{
    fallback_result, ActionDispatcher, DispatchError, DispatchSettings, NO_PROVIDER_RESULT,
};
pub use event_loop::{deck_channel, run_event_loop, DeckClosed, DeckHandle, Submission};
