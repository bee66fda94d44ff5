use serde::{Deserialize, Serialize};

/// The named pipe path used for IPC between CLI and daemon.
pub const PIPE_NAME: &str = r"\\.\pipe\pinnie";

/// A command sent from the CLI to the daemon.
///
/// These are serialized as JSON and sent over the named pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Request the daemon to stop.
    Stop,
    /// Request the daemon's current status.
    Status,
    /// Pin or unpin the window under the cursor, as the hotkey does.
    Toggle,
    /// Pin a specific window.
    Pin { hwnd: usize },
    /// Unpin a specific window.
    Unpin { hwnd: usize },
    /// List pinned windows, topmost first.
    List,
    /// Re-read `config.toml` and apply hotkey and overlay settings.
    Reload,
}

/// A pinned window as reported to the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinnedEntry {
    pub hwnd: usize,
    /// Window caption at the time of the request.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// A response sent from the daemon back to the CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub status: ResponseStatus,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Pinned windows, filled in for `list`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pinned: Vec<PinnedEntry>,
    /// The hotkey the daemon actually holds, filled in for `status`.
    /// Absent when none could be registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
}

/// Status of a daemon response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl Response {
    /// Creates a successful response with no message.
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: None,
            pinned: Vec::new(),
            hotkey: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    /// Creates a successful response carrying the pinned window list.
    pub fn with_pinned(pinned: Vec<PinnedEntry>) -> Self {
        Self {
            pinned,
            ..Self::ok()
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            pinned: Vec::new(),
            hotkey: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_serializes_with_tag() {
        // Act
        let json = serde_json::to_string(&Command::Pin { hwnd: 0x1234 }).unwrap();

        // Assert
        assert_eq!(json, r#"{"command":"pin","hwnd":4660}"#);
    }

    #[test]
    fn unit_command_parses_from_tag_only() {
        // Act
        let cmd: Command = serde_json::from_str(r#"{"command":"toggle"}"#).unwrap();

        // Assert
        assert_eq!(cmd, Command::Toggle);
    }

    #[test]
    fn ok_response_omits_empty_fields() {
        // Act
        let json = serde_json::to_string(&Response::ok()).unwrap();

        // Assert
        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn list_response_parses_without_titles() {
        // Arrange
        let json = r#"{"status":"ok","pinned":[{"hwnd":1},{"hwnd":2,"title":"Notes"}]}"#;

        // Act
        let response: Response = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.is_ok());
        assert_eq!(response.pinned.len(), 2);
        assert_eq!(response.pinned[0].title, "");
        assert_eq!(response.pinned[1].title, "Notes");
    }

    #[test]
    fn error_response_carries_message() {
        // Act
        let response = Response::error("no window under cursor");

        // Assert
        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.message.as_deref(), Some("no window under cursor"));
    }
}
