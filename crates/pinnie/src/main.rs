mod commands;

use clap::{Parser, Subcommand};

use pinnie_core::ipc::Command;

#[derive(Parser)]
#[command(
    name = "pinnie",
    version,
    about = "Pin any window always-on-top with a tracked border overlay"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Start the pinning daemon
    Start,
    /// Stop the daemon and unpin every window
    Stop,
    /// Show whether the daemon is running
    Status,
    /// Pin or unpin the window under the mouse cursor
    Toggle,
    /// Pin a window by handle
    Pin {
        /// Window handle, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_hwnd)]
        hwnd: usize,
    },
    /// Unpin a window by handle
    Unpin {
        /// Window handle, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_hwnd)]
        hwnd: usize,
    },
    /// List pinned windows, topmost first
    List,
    /// Re-read the configuration file
    Reload,
    /// Run the daemon (internal, not for direct use)
    #[command(hide = true)]
    Daemon,
}

/// Parses a window handle as printed by `pinnie list` (hex) or as a
/// plain decimal number.
fn parse_hwnd(s: &str) -> Result<usize, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    match parsed {
        Ok(0) => Err("window handle must not be zero".into()),
        Ok(hwnd) => Ok(hwnd),
        Err(e) => Err(format!("invalid window handle {s:?}: {e}")),
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Start => commands::start::execute(),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Daemon => commands::daemon::execute(),
        Commands::Toggle => commands::send::execute(&Command::Toggle),
        Commands::Pin { hwnd } => commands::send::execute(&Command::Pin { hwnd }),
        Commands::Unpin { hwnd } => commands::send::execute(&Command::Unpin { hwnd }),
        Commands::List => commands::list::execute(),
        Commands::Reload => commands::send::execute(&Command::Reload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hwnd_accepts_hex_and_decimal() {
        assert_eq!(parse_hwnd("0x1a2b"), Ok(0x1A2B));
        assert_eq!(parse_hwnd("0X1A2B"), Ok(0x1A2B));
        assert_eq!(parse_hwnd("6699"), Ok(6699));
    }

    #[test]
    fn parse_hwnd_rejects_zero_and_garbage() {
        assert!(parse_hwnd("0").is_err());
        assert!(parse_hwnd("0x0").is_err());
        assert!(parse_hwnd("notepad").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
