use serde::{Deserialize, Serialize};

use crate::hotkey::Hotkey;
use crate::keys;

/// The user-configured pin/unpin hotkey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Key name (e.g. "T", "F9", "Space").
    pub key: String,
    /// Modifier keys (e.g. ["ctrl", "win"]).
    pub modifiers: Vec<Modifier>,
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

impl Modifier {
    /// Returns the Win32 `MOD_*` bit for this modifier.
    pub fn flag(self) -> u32 {
        match self {
            Self::Alt => 0x0001,
            Self::Ctrl => 0x0002,
            Self::Shift => 0x0004,
            Self::Win => 0x0008,
        }
    }

    /// Expands a modifier bitmask back into modifier names.
    pub fn from_flags(flags: u32) -> Vec<Self> {
        [Self::Ctrl, Self::Alt, Self::Shift, Self::Win]
            .into_iter()
            .filter(|m| flags & m.flag() != 0)
            .collect()
    }
}

/// Default: Ctrl + Win + T.
impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            key: "T".into(),
            modifiers: vec![Modifier::Ctrl, Modifier::Win],
        }
    }
}

impl HotkeyConfig {
    /// Resolves the key name and modifiers into a `(modifiers, vk)` pair.
    ///
    /// Returns `None` for unknown key names.
    pub fn to_hotkey(&self) -> Option<Hotkey> {
        let key = keys::vk_from_name(&self.key)?;
        let modifiers = self.modifiers.iter().fold(0, |acc, m| acc | m.flag());
        Some(Hotkey { modifiers, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hotkey_is_ctrl_win_t() {
        // Act
        let hotkey = HotkeyConfig::default().to_hotkey();

        // Assert
        assert_eq!(
            hotkey,
            Some(Hotkey {
                modifiers: 0x0002 | 0x0008,
                key: 0x54
            })
        );
    }

    #[test]
    fn unknown_key_name_does_not_resolve() {
        // Arrange
        let config = HotkeyConfig {
            key: "Hyper".into(),
            modifiers: vec![Modifier::Alt],
        };

        // Act / Assert
        assert_eq!(config.to_hotkey(), None);
    }

    #[test]
    fn modifier_flags_roundtrip() {
        // Arrange
        let flags = Modifier::Alt.flag() | Modifier::Shift.flag();

        // Act
        let modifiers = Modifier::from_flags(flags);

        // Assert
        assert_eq!(modifiers, vec![Modifier::Alt, Modifier::Shift]);
    }
}
