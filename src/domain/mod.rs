//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod deck;
pub mod error;

// Re-export common types
pub use config::AppConfig;
pub use deck::{
    ActionRequest, DeckCommand, DeckPhase, DeckSession, DeviceSnapshot, DeviceState, InputEvent,
    Keymap, ProviderId, Rgb, TransformKind,
};
pub use error::*;
