use std::sync::mpsc;
use std::thread;

use pinnie_core::ipc::{Command, Response};

use crate::event_loop;
use crate::ipc;

use super::daemon_types::{DaemonMsg, ResponseSender};

/// Spawns the thread that serves CLI requests.
///
/// Each command is queued for the pump thread, which is then woken; the
/// listener waits for the engine's reply before taking the next client.
pub(super) fn spawn_ipc_listener(
    tx: mpsc::Sender<DaemonMsg>,
    pump_thread: u32,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Some(stop) = serve_one(&tx, pump_thread) {
            if stop {
                break;
            }
        }
    })
}

/// Handles a single client. Returns `Some(true)` after a stop request and
/// `None` when the listener can no longer run.
fn serve_one(tx: &mpsc::Sender<DaemonMsg>, pump_thread: u32) -> Option<bool> {
    let mut connection = match ipc::accept() {
        Ok(c) => c,
        Err(e) => {
            pinnie_core::log_error!("IPC listener stopped: {e}");
            return None;
        }
    };

    let command: Command = match connection.receive() {
        Ok(cmd) => cmd,
        Err(e) => {
            pinnie_core::log_warn!("Dropped malformed request: {e}");
            let _ = connection.send(&Response::error(format!("bad request: {e}")));
            return Some(false);
        }
    };

    let stop = matches!(command, Command::Stop);
    let (reply_tx, reply_rx): (ResponseSender, _) = mpsc::channel();
    if tx.send(DaemonMsg::Command(command, reply_tx)).is_err() || !event_loop::wake(pump_thread) {
        return None;
    }

    if let Ok(response) = reply_rx.recv() {
        let _ = connection.send(&response);
    }
    Some(stop)
}
