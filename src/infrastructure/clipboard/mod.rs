//! Clipboard infrastructure module
//!
//! Provides cross-platform clipboard support using arboard (primary)
//! or the xclip binary on X11 hosts where arboard cannot hold a selection.

mod arboard;
mod xclip;

pub use arboard::ArboardClipboard;
pub use xclip::XclipClipboard;

use crate::application::ports::Clipboard;
use crate::domain::config::ClipboardTool;

/// Create the clipboard adapter for the configured tool
pub fn create_clipboard(tool: ClipboardTool) -> Box<dyn Clipboard> {
    match tool {
        ClipboardTool::Arboard => Box::new(ArboardClipboard::new()),
        ClipboardTool::Xclip => Box::new(XclipClipboard::new()),
    }
}
