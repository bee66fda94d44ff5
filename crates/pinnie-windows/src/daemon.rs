//! The background process behind `pinnie start`.

use pinnie_core::WindowResult;
use pinnie_core::pid::PidFile;

use crate::dpi;

#[path = "daemon_ipc.rs"]
mod daemon_ipc;
#[path = "daemon_loop.rs"]
mod daemon_loop;
#[path = "daemon_loop_handlers.rs"]
mod daemon_loop_handlers;
#[path = "daemon_types.rs"]
mod daemon_types;

/// Runs the daemon until a `stop` command arrives.
///
/// The calling thread becomes the pump thread: it owns the pin engine,
/// the WinEvent hooks, the tick timer and the hotkey. CLI requests are
/// read on a separate listener thread and handed over through a channel.
pub fn run() -> WindowResult<()> {
    dpi::enable_dpi_awareness();

    let pid_file = PidFile::daemon()?;
    pid_file.write(std::process::id())?;

    let outcome = daemon_loop::daemon_loop();
    if let Err(e) = pid_file.remove() {
        eprintln!("Warning: could not remove PID file: {e}");
    }
    outcome
}
