pub mod config;
pub mod engine;
pub mod event;
pub mod hotkey;
pub mod ipc;
pub mod keys;
pub mod log;
pub mod pid;
pub mod pin_set;
pub mod rect;
pub mod resolver;
pub mod tracker;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{Notification, PinEngine, Work};
pub use event::WindowEvent;
pub use hotkey::{HOTKEY_ID, Hotkey, HotkeyBackend, WM_HOTKEY};
pub use ipc::{Command, PIPE_NAME, PinnedEntry, Response, ResponseStatus};
pub use rect::{FrameOffset, Point, Rect};
pub use window::{Decoration, DecorationFactory, WindowManager, WindowResult};
