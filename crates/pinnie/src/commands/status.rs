use pinnie_core::ipc::Command;
use pinnie_core::pid;
use pinnie_windows::{ipc, process};

/// Prints whether the daemon is running. Exits with status 1 when it is
/// not, so scripts can test for it.
pub fn execute() {
    if ipc::is_daemon_running() {
        let line = ipc::send_command(&Command::Status)
            .ok()
            .filter(|r| r.is_ok())
            .and_then(|r| r.message);
        println!("{}", line.as_deref().unwrap_or("Pinnie is running."));
        return;
    }

    match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => {
            println!("Pinnie process {pid} exists but is not answering on its pipe.");
        }
        Ok(Some(_)) => {
            let _ = pid::remove_pid_file();
            println!("Pinnie is not running (removed a stale PID file).");
        }
        _ => println!("Pinnie is not running."),
    }
    std::process::exit(1);
}
