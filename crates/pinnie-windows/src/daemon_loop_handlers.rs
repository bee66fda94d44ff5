use std::sync::mpsc;

use pinnie_core::Notification;
use pinnie_core::ipc::{Command, Response};

use crate::desktop;

use super::daemon_types::Engine;

pub(super) fn handle_command(command: &Command, engine: &mut Engine) -> Response {
    match command {
        Command::Stop => {
            pinnie_core::log_info!("Stop command received, shutting down");
            engine.execute(command)
        }
        Command::List => {
            let mut response = engine.execute(command);
            for entry in &mut response.pinned {
                entry.title = desktop::window_title(entry.hwnd);
            }
            response
        }
        Command::Reload => {
            pinnie_core::log_info!("Reloading configuration");
            engine.execute(command)
        }
        _ => engine.execute(command),
    }
}

/// Drains engine notifications into the log.
pub(super) fn drain_notifications(rx: &mpsc::Receiver<Notification>) {
    for notification in rx.try_iter() {
        match notification {
            Notification::Pinned { hwnd } => {
                pinnie_core::log_debug!("Pinned {hwnd:#x}");
            }
            Notification::Unpinned { hwnd } => {
                pinnie_core::log_debug!("Unpinned {hwnd:#x}");
            }
            Notification::HotkeyChanged { hotkey } => {
                pinnie_core::log_info!("Hotkey is now {hotkey}");
            }
        }
    }
}
