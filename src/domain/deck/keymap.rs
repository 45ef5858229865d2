//! Fixed nine-slot key-to-action table

use crate::domain::error::InvalidBindingError;

use super::action::ActionRequest;
use super::transform::TransformKind;

/// Number of keys on the pad (3x3 matrix)
pub const KEY_SLOTS: usize = 9;

/// Binding names for the factory layout, slot by slot
pub const DEFAULT_BINDINGS: [&str; KEY_SLOTS] = [
    "open",
    "close",
    "summarize",
    "expand",
    "humanize",
    "switch:gpt",
    "switch:gemini",
    "switch:llama",
    "none",
];

/// Key-to-action table bound once at startup.
///
/// Unbound slots (and slots past the end of the pad) resolve to `None`,
/// which the dispatcher treats as a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    slots: [Option<ActionRequest>; KEY_SLOTS],
}

impl Keymap {
    /// Build a keymap from binding strings.
    ///
    /// Fewer than nine bindings leave the remaining slots unbound.
    pub fn from_bindings<S: AsRef<str>>(bindings: &[S]) -> Result<Self, InvalidBindingError> {
        if bindings.len() > KEY_SLOTS {
            return Err(InvalidBindingError::TooManySlots {
                count: bindings.len(),
                max: KEY_SLOTS,
            });
        }

        let mut slots: [Option<ActionRequest>; KEY_SLOTS] = Default::default();
        for (slot, binding) in bindings.iter().enumerate() {
            slots[slot] = parse_binding(slot, binding.as_ref())?;
        }

        Ok(Self { slots })
    }

    /// Action bound to a slot, if any
    pub fn resolve(&self, slot: usize) -> Option<&ActionRequest> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Binding strings for every slot, in order
    pub fn bindings(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Some(action) => action.to_string(),
                None => "none".to_string(),
            })
            .collect()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let slots = DEFAULT_BINDINGS.map(|binding| parse_binding(0, binding).ok().flatten());
        Self { slots }
    }
}

/// Parse a single binding string
pub fn parse_binding(slot: usize, binding: &str) -> Result<Option<ActionRequest>, InvalidBindingError> {
    let normalized = binding.trim().to_lowercase();

    if let Some(id) = normalized.strip_prefix("switch:") {
        let id = id.trim();
        if id.is_empty() {
            return Err(InvalidBindingError::UnknownAction {
                slot,
                binding: binding.to_string(),
            });
        }
        return Ok(Some(ActionRequest::SwitchProvider(id.to_string())));
    }

    match normalized.as_str() {
        "" | "none" => Ok(None),
        "open" => Ok(Some(ActionRequest::Open)),
        "close" => Ok(Some(ActionRequest::Close)),
        other => other
            .parse::<TransformKind>()
            .map(|kind| Some(ActionRequest::Transform(kind)))
            .map_err(|_| InvalidBindingError::UnknownAction {
                slot,
                binding: binding.to_string(),
            }),
    }
}
