//! Deck domain module

mod action;
mod indicator;
mod keymap;
mod provider;
mod queue;
mod session;
mod state;
mod transform;

pub use action::{ActionRequest, DeckCommand, InputEvent};
pub use indicator::Rgb;
pub use keymap::{parse_binding, Keymap, DEFAULT_BINDINGS, KEY_SLOTS};
pub use provider::{chat_url_for, ProviderId, ALL_PROVIDERS};
pub use queue::{Admission, InputQueue};
pub use session::{DeckPhase, DeckSession, InvalidStateTransition};
pub use state::{
    DeviceSnapshot, DeviceState, DEFAULT_PARAMETER, PARAMETER_MAX, PARAMETER_MIN, STATUS_READY,
    STATUS_UNKNOWN_PROVIDER,
};
pub use transform::TransformKind;
