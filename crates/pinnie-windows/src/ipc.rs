//! Named-pipe transport for CLI ⇄ daemon requests.
//!
//! Every exchange is one JSON line from the client followed by one JSON
//! line from the daemon, after which the daemon disconnects.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::os::windows::io::{AsRawHandle, FromRawHandle};

use pinnie_core::WindowResult;
use pinnie_core::ipc::{Command, PIPE_NAME, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use windows::Win32::Foundation::{ERROR_PIPE_CONNECTED, GENERIC_READ, GENERIC_WRITE, HANDLE};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_FLAGS_AND_ATTRIBUTES, FILE_SHARE_NONE, FlushFileBuffers, OPEN_EXISTING,
    PIPE_ACCESS_DUPLEX,
};
use windows::Win32::System::Pipes::{
    ConnectNamedPipe, CreateNamedPipeW, DisconnectNamedPipe, PIPE_READMODE_BYTE, PIPE_TYPE_BYTE,
    PIPE_UNLIMITED_INSTANCES, PIPE_WAIT, WaitNamedPipeW,
};
use windows::core::HSTRING;

/// In/out buffer size per pipe instance. `list` replies carry titles.
const PIPE_BUFFER: u32 = 4096;

/// Which end of the pipe a [`PipeConnection`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Daemon,
    Client,
}

/// A connected pipe carrying newline-delimited JSON.
///
/// Owns the pipe handle; the daemon side flushes and disconnects the
/// client when dropped.
pub struct PipeConnection {
    stream: BufReader<File>,
    side: Side,
}

impl PipeConnection {
    /// Takes ownership of an open pipe handle.
    fn adopt(handle: HANDLE, side: Side) -> Self {
        // SAFETY: the caller hands over a valid handle that nothing else
        // closes; the File closes it on drop.
        let file = unsafe { File::from_raw_handle(handle.0) };
        Self {
            stream: BufReader::new(file),
            side,
        }
    }

    fn raw(&self) -> HANDLE {
        HANDLE(self.stream.get_ref().as_raw_handle())
    }

    /// Writes one message.
    pub fn send<T: Serialize>(&mut self, value: &T) -> WindowResult<()> {
        let line = encode_line(value)?;
        let file = self.stream.get_mut();
        file.write_all(&line)?;
        file.flush()?;
        Ok(())
    }

    /// Blocks until one message arrives.
    pub fn receive<T: DeserializeOwned>(&mut self) -> WindowResult<T> {
        let mut line = String::new();
        if self.stream.read_line(&mut line)? == 0 {
            return Err("pipe closed before a message arrived".into());
        }
        decode_line(&line)
    }
}

impl Drop for PipeConnection {
    fn drop(&mut self) {
        if self.side == Side::Daemon {
            let handle = self.raw();
            // SAFETY: the handle is still owned by `stream`. Flushing first
            // keeps the reply from being discarded by the disconnect.
            unsafe {
                let _ = FlushFileBuffers(handle);
                let _ = DisconnectNamedPipe(handle);
            }
        }
    }
}

/// Creates a fresh pipe instance and blocks until a client connects.
pub fn accept() -> WindowResult<PipeConnection> {
    let name = HSTRING::from(PIPE_NAME);

    // SAFETY: plain FFI call; the result is checked below.
    let handle = unsafe {
        CreateNamedPipeW(
            &name,
            PIPE_ACCESS_DUPLEX,
            PIPE_TYPE_BYTE | PIPE_READMODE_BYTE | PIPE_WAIT,
            PIPE_UNLIMITED_INSTANCES,
            PIPE_BUFFER,
            PIPE_BUFFER,
            0,
            None,
        )
    };
    if handle.is_invalid() {
        return Err(format!("CreateNamedPipeW failed for {PIPE_NAME}").into());
    }
    let connection = PipeConnection::adopt(handle, Side::Daemon);

    // SAFETY: the handle is a valid server instance owned by `connection`.
    match unsafe { ConnectNamedPipe(connection.raw(), None) } {
        Ok(()) => Ok(connection),
        // A client that raced in before the wait is already connected.
        Err(e) if e.code() == ERROR_PIPE_CONNECTED.to_hresult() => Ok(connection),
        Err(e) => Err(e.into()),
    }
}

/// Opens the daemon's pipe as a client.
fn connect() -> WindowResult<PipeConnection> {
    let name = HSTRING::from(PIPE_NAME);

    // SAFETY: opens an existing pipe; failure is returned as an error.
    let handle = unsafe {
        CreateFileW(
            &name,
            GENERIC_READ.0 | GENERIC_WRITE.0,
            FILE_SHARE_NONE,
            None,
            OPEN_EXISTING,
            FILE_FLAGS_AND_ATTRIBUTES(0),
            None,
        )?
    };
    Ok(PipeConnection::adopt(handle, Side::Client))
}

/// Sends a command to the running daemon and waits for its answer.
pub fn send_command(command: &Command) -> WindowResult<Response> {
    let mut connection = connect()?;
    connection.send(command)?;
    connection.receive()
}

/// Returns whether a daemon pipe instance is waiting for clients.
///
/// Does not consume the instance.
pub fn is_daemon_running() -> bool {
    let name = HSTRING::from(PIPE_NAME);
    // SAFETY: only probes for an available instance, 1 ms timeout.
    unsafe { WaitNamedPipeW(&name, 1).as_bool() }
}

fn encode_line<T: Serialize>(value: &T) -> WindowResult<Vec<u8>> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    Ok(line)
}

fn decode_line<T: DeserializeOwned>(line: &str) -> WindowResult<T> {
    Ok(serde_json::from_str(line.trim_end_matches(['\r', '\n']))?)
}
