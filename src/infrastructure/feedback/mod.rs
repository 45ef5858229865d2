//! Feedback sink adapters
//!
//! The host stand-ins for the keypad's display and indicator LEDs.

mod notify;
mod terminal;

pub use notify::NotifyFeedback;
pub use terminal::TerminalFeedback;

use crate::application::ports::FeedbackSink;
use crate::domain::config::FeedbackKind;

/// Create the feedback sink for the configured kind
pub fn create_feedback(kind: FeedbackKind) -> Box<dyn FeedbackSink> {
    match kind {
        FeedbackKind::Terminal => Box::new(TerminalFeedback::new()),
        FeedbackKind::Notify => Box::new(NotifyFeedback::new()),
    }
}
