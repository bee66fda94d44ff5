use pinnie_core::ipc::Command;
use pinnie_core::pid;
use pinnie_windows::{ipc, process};

/// Stops the daemon. A graceful stop unpins every window first; if the
/// daemon no longer answers, its process is terminated instead.
pub fn execute() {
    if ipc::is_daemon_running() {
        match ipc::send_command(&Command::Stop) {
            Ok(response) if response.is_ok() => {
                println!("Pinnie stopped. All windows unpinned.");
                return;
            }
            Ok(response) => {
                let reason = response.message.unwrap_or_else(|| "unknown error".into());
                eprintln!("Error: daemon refused to stop: {reason}");
                std::process::exit(1);
            }
            Err(e) => eprintln!("Daemon did not answer ({e}); falling back to the PID file."),
        }
    }

    let pid = match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => pid,
        Ok(Some(_)) => {
            let _ = pid::remove_pid_file();
            println!("Pinnie is not running.");
            return;
        }
        _ => {
            println!("Pinnie is not running.");
            return;
        }
    };

    if let Err(e) = process::kill_process(pid) {
        eprintln!("Error: could not terminate PID {pid}: {e}");
        std::process::exit(1);
    }
    let _ = pid::remove_pid_file();
    println!("Pinnie stopped (terminated PID {pid}).");
    println!("Windows it had pinned may still be always-on-top.");
}
