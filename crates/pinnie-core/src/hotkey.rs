use std::fmt;

use serde::{Deserialize, Serialize};

use crate::WindowResult;

/// Identifier the pin hotkey is registered under.
pub const HOTKEY_ID: i32 = 9000;

/// The `WM_HOTKEY` window message.
pub const WM_HOTKEY: u32 = 0x0312;

/// A global hotkey as `(modifier_bitmask, virtual_key_code)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    /// `MOD_*` bits (Alt 1, Ctrl 2, Shift 4, Win 8).
    pub modifiers: u32,
    /// Windows virtual key code.
    pub key: u32,
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::keys::describe(self))
    }
}

/// OS side of global hotkey registration.
///
/// The backend owns whatever receives the hotkey messages (a window or
/// the registering thread's queue).
pub trait HotkeyBackend {
    fn register(&mut self, id: i32, hotkey: Hotkey) -> WindowResult<()>;
    fn unregister(&mut self, id: i32);
}

/// Registers the single pin hotkey and recognises its messages.
///
/// The binding is released when the dispatcher is dropped.
pub struct HotkeyDispatch<B: HotkeyBackend> {
    backend: B,
    current: Option<Hotkey>,
}

impl<B: HotkeyBackend> HotkeyDispatch<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    /// The binding currently registered with the OS, if any.
    pub fn current(&self) -> Option<Hotkey> {
        self.current
    }

    /// Registers `hotkey`, replacing any existing binding.
    ///
    /// Returns `false` when the OS refuses it (usually because another
    /// process already owns the combination).
    pub fn register(&mut self, hotkey: Hotkey) -> bool {
        self.unregister();
        match self.backend.register(HOTKEY_ID, hotkey) {
            Ok(()) => {
                self.current = Some(hotkey);
                crate::log_info!("Registered hotkey {hotkey}");
                true
            }
            Err(e) => {
                crate::log_warn!("Failed to register hotkey {hotkey}: {e}");
                false
            }
        }
    }

    /// Releases the current binding. No-op when nothing is registered.
    pub fn unregister(&mut self) {
        if self.current.take().is_some() {
            self.backend.unregister(HOTKEY_ID);
        }
    }

    /// Returns `true` when the message is the registered pin hotkey.
    pub fn dispatch_if_matches(&self, message: u32, param: usize) -> bool {
        self.current.is_some() && message == WM_HOTKEY && param == HOTKEY_ID as usize
    }

    /// Swaps the binding for `hotkey`.
    ///
    /// On failure the previous binding is registered again and `false`
    /// is returned.
    pub fn rebind(&mut self, hotkey: Hotkey) -> bool {
        let previous = self.current;
        if self.register(hotkey) {
            return true;
        }
        if let Some(old) = previous
            && !self.register(old)
        {
            crate::log_error!("Could not restore previous hotkey {old}");
        }
        false
    }
}

impl<B: HotkeyBackend> Drop for HotkeyDispatch<B> {
    fn drop(&mut self) {
        self.unregister();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHotkeys;

    const CTRL_WIN_T: Hotkey = Hotkey {
        modifiers: 0x0002 | 0x0008,
        key: 0x54,
    };
    const ALT_P: Hotkey = Hotkey {
        modifiers: 0x0001,
        key: 0x50,
    };

    #[test]
    fn register_then_dispatch_matches_only_hotkey_id() {
        // Arrange
        let mut dispatch = HotkeyDispatch::new(FakeHotkeys::default());

        // Act
        let ok = dispatch.register(CTRL_WIN_T);

        // Assert
        assert!(ok);
        assert!(dispatch.dispatch_if_matches(WM_HOTKEY, HOTKEY_ID as usize));
        assert!(!dispatch.dispatch_if_matches(WM_HOTKEY, 1));
        assert!(!dispatch.dispatch_if_matches(0x0100, HOTKEY_ID as usize));
    }

    #[test]
    fn unregistered_dispatch_never_matches() {
        // Arrange
        let mut dispatch = HotkeyDispatch::new(FakeHotkeys::default());
        dispatch.register(CTRL_WIN_T);

        // Act
        dispatch.unregister();

        // Assert
        assert!(!dispatch.dispatch_if_matches(WM_HOTKEY, HOTKEY_ID as usize));
        assert!(dispatch.backend.registered.borrow().is_empty());
    }

    #[test]
    fn conflicting_register_returns_false() {
        // Arrange
        let backend = FakeHotkeys::default();
        backend.taken.borrow_mut().push(CTRL_WIN_T);
        let mut dispatch = HotkeyDispatch::new(backend);

        // Act
        let ok = dispatch.register(CTRL_WIN_T);

        // Assert
        assert!(!ok);
        assert_eq!(dispatch.current(), None);
    }

    #[test]
    fn rebind_replaces_old_binding() {
        // Arrange
        let mut dispatch = HotkeyDispatch::new(FakeHotkeys::default());
        dispatch.register(CTRL_WIN_T);

        // Act
        let ok = dispatch.rebind(ALT_P);

        // Assert
        assert!(ok);
        assert_eq!(dispatch.current(), Some(ALT_P));
        assert_eq!(*dispatch.backend.registered.borrow(), vec![ALT_P]);
    }

    #[test]
    fn failed_rebind_restores_previous_binding() {
        // Arrange
        let backend = FakeHotkeys::default();
        backend.taken.borrow_mut().push(ALT_P);
        let mut dispatch = HotkeyDispatch::new(backend);
        dispatch.register(CTRL_WIN_T);

        // Act
        let ok = dispatch.rebind(ALT_P);

        // Assert
        assert!(!ok);
        assert_eq!(dispatch.current(), Some(CTRL_WIN_T));
        assert_eq!(*dispatch.backend.registered.borrow(), vec![CTRL_WIN_T]);
    }

    #[test]
    fn drop_releases_binding() {
        // Arrange
        let backend = FakeHotkeys::default();
        let registered = backend.registered.clone();
        let mut dispatch = HotkeyDispatch::new(backend);
        dispatch.register(CTRL_WIN_T);

        // Act
        drop(dispatch);

        // Assert
        assert!(registered.borrow().is_empty());
    }

    #[test]
    fn display_uses_key_names() {
        assert_eq!(CTRL_WIN_T.to_string(), "Ctrl + Win + T");
    }
}
