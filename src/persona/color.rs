//! Validated hex colors for the persona's primary color

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// A 24-bit color, always printed as lowercase `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    /// Build a color from a packed `0xRRGGBB` value; higher bits are dropped
    pub fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    /// Packed `0xRRGGBB` value
    pub fn rgb(self) -> u32 {
        self.0
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(0x3b82f6)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Color {
    type Err = FormError;

    /// Accepts `#rgb` and `#rrggbb`, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormError::InvalidColor(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(invalid()),
        };
        u32::from_str_radix(&expanded, 16)
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for Color {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
