//! LLMDeck - macro keypad controller for LLM text transforms
//!
//! Nine keys and a rotary encoder drive clipboard transformations
//! (summarize, expand, humanize) through a selectable provider, with
//! the result shown on a small status screen and written back to the
//! clipboard.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Device state, actions, keymap, session phases, and errors
//! - **Application**: The action dispatcher, its event loop, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (clipboard, chat completions, launcher, feedback, config)
//! - **CLI**: Command-line interface, IPC, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
