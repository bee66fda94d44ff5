//! Key-name ⇄ virtual-key-code conversion for the pin hotkey.

use crate::config::Modifier;
use crate::hotkey::Hotkey;

/// Named keys and their Windows virtual key codes.
///
/// The first name listed for a code is the one used for display.
const NAMED_KEYS: &[(&str, u32)] = &[
    ("Enter", 0x0D),
    ("Return", 0x0D),
    ("Tab", 0x09),
    ("Esc", 0x1B),
    ("Escape", 0x1B),
    ("Space", 0x20),
    ("Backspace", 0x08),
    ("Delete", 0x2E),
    ("Del", 0x2E),
    ("Insert", 0x2D),
    ("Ins", 0x2D),
    ("Home", 0x24),
    ("End", 0x23),
    ("PageUp", 0x21),
    ("PgUp", 0x21),
    ("PageDown", 0x22),
    ("PgDn", 0x22),
    ("Left", 0x25),
    ("Up", 0x26),
    ("Right", 0x27),
    ("Down", 0x28),
    ("Minus", 0xBD),
    ("Plus", 0xBB),
    ("Equals", 0xBB),
    ("Comma", 0xBC),
    ("Period", 0xBE),
    ("Dot", 0xBE),
    ("Slash", 0xBF),
    ("Semicolon", 0xBA),
    ("Backslash", 0xDC),
    ("LBracket", 0xDB),
    ("RBracket", 0xDD),
    ("Quote", 0xDE),
    ("Backtick", 0xC0),
    ("Grave", 0xC0),
    ("Pause", 0x13),
    ("PrintScreen", 0x2C),
];

/// VK_F1; F1–F24 are contiguous.
const VK_F1: u32 = 0x70;

/// Converts a key name string to a Windows virtual key code.
///
/// Supports letters (A–Z), digits (0–9), function keys (F1–F24),
/// and common named keys (Enter, Space, Tab, etc.).
/// Matching is case-insensitive.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let name = name.trim();

    if let [ch] = name.as_bytes() {
        let ch = ch.to_ascii_uppercase();
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            return Some(u32::from(ch));
        }
    }

    if let Some(rest) = name.strip_prefix(['F', 'f'])
        && let Ok(n) = rest.parse::<u32>()
        && (1..=24).contains(&n)
    {
        return Some(VK_F1 + n - 1);
    }

    NAMED_KEYS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|&(_, vk)| vk)
}

/// Returns a display name for a virtual key code.
///
/// Unknown codes are shown as hex (e.g. "0xE2").
pub fn name_from_vk(vk: u32) -> String {
    if let Ok(byte) = u8::try_from(vk)
        && (byte.is_ascii_uppercase() || byte.is_ascii_digit())
    {
        return char::from(byte).to_string();
    }
    if (VK_F1..VK_F1 + 24).contains(&vk) {
        return format!("F{}", vk - VK_F1 + 1);
    }
    NAMED_KEYS
        .iter()
        .find(|&&(_, code)| code == vk)
        .map_or_else(|| format!("0x{vk:02X}"), |(key, _)| (*key).to_string())
}

/// Formats a hotkey for humans, e.g. "Ctrl + Win + T".
pub fn describe(hotkey: &Hotkey) -> String {
    let mut parts: Vec<String> = Modifier::from_flags(hotkey.modifiers)
        .into_iter()
        .map(|m| format!("{m:?}"))
        .collect();
    parts.push(name_from_vk(hotkey.key));
    parts.join(" + ")
}
