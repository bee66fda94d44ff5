/// Daemon main loop.
pub mod daemon;

/// Live `WindowManager` backed by user32 and DWM.
pub mod desktop;

/// Per-monitor DPI awareness and scale lookup.
pub mod dpi;

/// WinEvent translation.
pub mod event;

/// WinEvent hooks, tick timer and the message pump.
pub mod event_loop;

/// Window frame geometry via DWM.
pub mod frame;

/// Global hotkey registration on the pump thread.
pub mod hotkey;

/// IPC via Named Pipes.
pub mod ipc;

/// Layered overlay windows drawn around pinned targets.
pub mod overlay;

/// Process utilities (alive check, kill).
pub mod process;

pub use desktop::Desktop;
pub use overlay::{Overlay, OverlayFactory};
