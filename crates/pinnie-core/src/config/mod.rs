pub mod keybinding;
mod loader;
pub mod template;
mod types;

use serde::{Deserialize, Serialize};

pub use crate::log::LogConfig;
pub use keybinding::{HotkeyConfig, Modifier};
pub use loader::{LoadError, config_dir, config_path, load, try_load};
pub use types::{Color, IconPosition, VisualSettings};

/// Top-level configuration for Pinnie.
///
/// Loaded from `~/.config/pinnie/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The global pin/unpin hotkey.
    pub hotkey: HotkeyConfig,
    /// Border and icon settings for pinned windows.
    pub overlay: VisualSettings,
    /// File logging.
    pub logging: LogConfig,
}

impl Config {
    /// Clamps overlay values to safe ranges.
    ///
    /// Prevents negative sizes and excessively large borders or icons
    /// that would push the decoration far outside the target window.
    pub fn validate(&mut self) {
        let overlay = &mut self.overlay;
        overlay.border_thickness = overlay.border_thickness.clamp(0, 32);
        overlay.corner_radius = overlay.corner_radius.clamp(0, 64);
        overlay.icon_size = overlay.icon_size.clamp(16, 256);
        if overlay
            .icon_path
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            overlay.icon_path = None;
        }
    }
}
