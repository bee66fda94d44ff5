use std::sync::mpsc;

use pinnie_core::ipc::{Command, Response};
use pinnie_core::{PinEngine, WindowEvent};

use crate::desktop::Desktop;
use crate::hotkey::ThreadHotkeys;
use crate::overlay::OverlayFactory;

/// The engine as wired to the live desktop.
pub(super) type Engine = PinEngine<Desktop, OverlayFactory, ThreadHotkeys>;

/// Internal message type for the main daemon thread.
pub(super) enum DaemonMsg {
    /// A window event from the WinEvent hooks.
    Event(WindowEvent),
    /// A CLI command with a callback to send the response.
    Command(Command, ResponseSender),
}

/// Sends a response back to the IPC thread for the connected client.
pub(super) type ResponseSender = mpsc::Sender<Response>;
