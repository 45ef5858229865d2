//! Indicator LED colors

use std::fmt;

/// An RGB color for the indicator LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Action in progress (amber)
    pub const BUSY: Rgb = Rgb(255, 255, 0);
    /// Action finished, also used at power-on
    pub const SUCCESS: Rgb = Rgb(0, 255, 0);
    /// Provider switched
    pub const INFO: Rgb = Rgb(0, 0, 255);
    /// Browser opened
    pub const SPECIAL: Rgb = Rgb(255, 0, 255);
    /// LEDs off
    pub const OFF: Rgb = Rgb(0, 0, 0);

    /// Name of the role this color plays, if it is one of the palette colors
    pub const fn role(&self) -> Option<&'static str> {
        match (self.0, self.1, self.2) {
            (255, 255, 0) => Some("busy"),
            (0, 255, 0) => Some("success"),
            (0, 0, 255) => Some("info"),
            (255, 0, 255) => Some("special"),
            (0, 0, 0) => Some("off"),
            _ => None,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
