use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use pinnie_core::config;
use pinnie_core::hotkey::Hotkey;
use pinnie_core::ipc::{self, Response};
use pinnie_windows::ipc::{is_daemon_running, send_command};

/// Windows process creation flags for launching a fully detached daemon.
///
/// `CREATE_NEW_PROCESS_GROUP` (0x200): the daemon gets its own process
/// group, so Ctrl+C in the CLI terminal won't kill it.
///
/// `CREATE_NO_WINDOW` (0x08000000): the daemon doesn't get a console
/// window or inherit the parent's console handles.
const DETACH_FLAGS: u32 = 0x08000000 | 0x00000200;

/// How long to wait for a freshly spawned daemon to answer `status`.
const READY_TIMEOUT: Duration = Duration::from_secs(3);

pub fn execute() {
    if pinnie_windows::ipc::is_daemon_running() {
        println!("Pinnie is already running.");
        return;
    }

    // Clean up stale PID file from a previous unclean shutdown
    if let Ok(Some(pid)) = pinnie_core::pid::read_pid_file() {
        if pinnie_windows::process::is_process_alive(pid) {
            println!("Pinnie process exists (PID: {pid}) but is not responding.");
            return;
        }
        let _ = pinnie_core::pid::remove_pid_file();
    }

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error: could not locate the pinnie executable: {e}");
            std::process::exit(1);
        }
    };

    // Re-run ourselves with the hidden `daemon` subcommand, detached so
    // the CLI can exit immediately.
    let mut child = match Command::new(exe)
        .arg("daemon")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(DETACH_FLAGS)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            eprintln!("Error: failed to start daemon: {e}");
            std::process::exit(1);
        }
    };

    let pid = child.id();
    let _ = child.try_wait();

    let status = wait_for_status();
    let configured = config::load().hotkey.to_hotkey();
    print_banner(pid, hotkey_line(configured, status.as_ref()));
}

/// Polls the new daemon until it answers `status` or the timeout passes.
fn wait_for_status() -> Option<Response> {
    let deadline = Instant::now() + READY_TIMEOUT;
    while Instant::now() < deadline {
        if is_daemon_running()
            && let Ok(response) = send_command(&ipc::Command::Status)
            && response.is_ok()
        {
            return Some(response);
        }
        thread::sleep(Duration::from_millis(100));
    }
    None
}

/// The banner's hotkey value, or the warning to show instead.
///
/// The daemon's own report wins over the config file: the configured
/// key may be taken by another application.
fn hotkey_line(configured: Option<Hotkey>, status: Option<&Response>) -> Result<String, String> {
    match (status, configured) {
        (Some(Response { hotkey: Some(bound), .. }), _) => Ok(bound.clone()),
        (Some(_), Some(hotkey)) => Err(format!(
            "{hotkey} is in use by another application; use 'pinnie toggle' instead."
        )),
        (Some(_), None) => Err(
            "the configured hotkey is not a known key; use 'pinnie toggle' instead.".to_string(),
        ),
        (None, Some(hotkey)) => Ok(format!("{hotkey} (daemon not answering yet)")),
        (None, None) => Ok("none".to_string()),
    }
}

/// Tips shown on startup, rotated by time so users see a different
/// one each time they start the daemon.
const TIPS: &[&str] = &[
    "Hover a window and press the hotkey to pin it",
    "Press the hotkey again over a pinned window to unpin it",
    "Run 'pinnie list' to see pinned windows, topmost first",
    "Run 'pinnie toggle' if another app owns the hotkey",
    "Change the hotkey or border color in ~/.config/pinnie/config.toml",
    "Run 'pinnie reload' after editing the config",
    "Run 'pinnie stop' to unpin everything and exit",
];

fn print_banner(pid: u32, hotkey: Result<String, String>) {
    let d = "\x1b[90m"; // Dim gray: labels
    let w = "\x1b[1;97m"; // Bold bright white: values
    let r = "\x1b[0m"; // Reset
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let tip = TIPS[secs as usize % TIPS.len()];
    let y = "\x1b[1;93m"; // Bold yellow: warnings

    super::banner::print_logo();
    println!();
    println!("  {d}Config{r}   ~/.config/pinnie/");
    println!("  {d}Daemon{r}   Started (PID: {w}{pid}{r})");
    match &hotkey {
        Ok(value) => println!("  {d}Hotkey{r}   {w}{value}{r}"),
        Err(_) => println!("  {d}Hotkey{r}   {y}not registered{r}"),
    }
    println!("  {d}Tip{r}      {tip}");
    println!();
    if let Err(warning) = hotkey {
        eprintln!("Warning: {warning}");
    }
}
