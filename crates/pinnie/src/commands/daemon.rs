/// Runs the daemon in the foreground until it is told to stop.
pub fn execute() {
    if let Err(e) = pinnie_windows::daemon::run() {
        pinnie_core::log_error!("Daemon exited with error: {e}");
        eprintln!("Daemon error: {e}");
        std::process::exit(1);
    }
}
