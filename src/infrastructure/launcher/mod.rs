//! Process launcher adapters

mod system;

pub use system::SystemLauncher;
