use pinnie_core::ipc::{Command, Response, ResponseStatus};

/// Sends a command to the running daemon and prints its reply.
///
/// Exits with status 1 if the daemon is not running or reports an error.
pub fn execute(command: &Command) {
    let response = request(command);
    if let Some(msg) = response.message {
        println!("{msg}");
    }
}

/// Sends a command and returns the daemon's successful response.
///
/// Exits the process on any failure.
pub fn request(command: &Command) -> Response {
    if !pinnie_windows::ipc::is_daemon_running() {
        eprintln!("Pinnie is not running. Start it with 'pinnie start'.");
        std::process::exit(1);
    }

    match pinnie_windows::ipc::send_command(command) {
        Ok(response) if response.status == ResponseStatus::Ok => response,
        Ok(response) => {
            eprintln!(
                "Error: {}",
                response.message.unwrap_or("unknown error".into()),
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to send command: {e}");
            std::process::exit(1);
        }
    }
}
