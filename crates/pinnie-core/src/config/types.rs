/// Reusable type definitions for Pinnie configuration.
///
/// Contains the overlay styling types shared between the config file,
/// the overlay tracker and the platform decoration windows.
use std::fmt;

use serde::{Deserialize, Serialize};

/// RGB color parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
    };

    /// Parses a hex color string like "#00b4d8" or "00b4d8".
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}, expected #rrggbb"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Horizontal placement of the floating icon inside the header band.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPosition {
    Left,
    #[default]
    Center,
    Right,
}

/// Process-wide decoration settings applied to every overlay.
///
/// The overlay tracker treats this as an immutable snapshot that is
/// replaced through its setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Draw the border around pinned windows.
    pub show_border: bool,
    /// Border thickness in pixels.
    pub border_thickness: i32,
    /// Border corner radius in pixels.
    pub corner_radius: i32,
    /// Border color (e.g. "#ffffff").
    pub border_color: Color,
    /// Show the floating icon above non-maximized pinned windows.
    pub show_icon: bool,
    /// Icon image file, or the name of a built-in icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    /// Icon height in logical pixels.
    pub icon_size: i32,
    /// Horizontal icon placement.
    pub icon_position: IconPosition,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_border: true,
            border_thickness: 4,
            corner_radius: 8,
            border_color: Color::WHITE,
            show_icon: true,
            icon_path: None,
            icon_size: 50,
            icon_position: IconPosition::Center,
        }
    }
}
