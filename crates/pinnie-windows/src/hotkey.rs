use pinnie_core::{Hotkey, HotkeyBackend, WindowResult};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_NOREPEAT, RegisterHotKey, UnregisterHotKey,
};

/// Registers hotkeys on the calling thread's message queue.
///
/// `WM_HOTKEY` messages arrive via the Win32 message pump running on the
/// same thread, so the backend must be created and used on the thread
/// that pumps messages.
#[derive(Debug, Default)]
pub struct ThreadHotkeys;

impl HotkeyBackend for ThreadHotkeys {
    fn register(&mut self, id: i32, hotkey: Hotkey) -> WindowResult<()> {
        let modifiers = HOT_KEY_MODIFIERS(hotkey.modifiers) | MOD_NOREPEAT;
        // SAFETY: RegisterHotKey registers a system-wide hotkey on the
        // current thread's message queue. A null HWND is allowed.
        unsafe { RegisterHotKey(None, id, modifiers, hotkey.key)? };
        Ok(())
    }

    fn unregister(&mut self, id: i32) {
        // SAFETY: UnregisterHotKey removes the hotkey registration; an
        // unknown id just fails.
        unsafe {
            let _ = UnregisterHotKey(None, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use pinnie_core::config::Modifier;
    use windows::Win32::UI::Input::KeyboardAndMouse::{MOD_ALT, MOD_CONTROL, MOD_SHIFT, MOD_WIN};

    use super::*;

    #[test]
    fn modifier_bits_match_win32_flags() {
        assert_eq!(HOT_KEY_MODIFIERS(Modifier::Alt.flag()), MOD_ALT);
        assert_eq!(HOT_KEY_MODIFIERS(Modifier::Ctrl.flag()), MOD_CONTROL);
        assert_eq!(HOT_KEY_MODIFIERS(Modifier::Shift.flag()), MOD_SHIFT);
        assert_eq!(HOT_KEY_MODIFIERS(Modifier::Win.flag()), MOD_WIN);
    }
}
