//! Daemon PID file in `%LOCALAPPDATA%\pinnie\pinnie.pid`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::WindowResult;

/// A PID file at a fixed path.
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The daemon's PID file, creating its directory if needed.
    pub fn daemon() -> WindowResult<Self> {
        let base = std::env::var_os("LOCALAPPDATA").ok_or("LOCALAPPDATA is not set")?;
        let dir = PathBuf::from(base).join("pinnie");
        fs::create_dir_all(&dir)?;
        Ok(Self::at(dir.join("pinnie.pid")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, pid: u32) -> WindowResult<()> {
        fs::write(&self.path, format!("{pid}\n"))?;
        Ok(())
    }

    /// Returns the recorded PID, or `None` when no file exists.
    pub fn read(&self) -> WindowResult<Option<u32>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(parse_pid(&contents)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the file. A file that is already gone is not an error.
    pub fn remove(&self) -> WindowResult<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

fn parse_pid(contents: &str) -> WindowResult<u32> {
    let text = contents.trim();
    match text.parse::<u32>() {
        Ok(pid) if pid != 0 => Ok(pid),
        _ => Err(format!("invalid PID file contents: {text:?}").into()),
    }
}

/// Reads the daemon PID, if a PID file exists.
pub fn read_pid_file() -> WindowResult<Option<u32>> {
    PidFile::daemon()?.read()
}

/// Removes the daemon PID file on clean shutdown or when it is stale.
pub fn remove_pid_file() -> WindowResult<()> {
    PidFile::daemon()?.remove()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PidFile {
        let dir = std::env::temp_dir().join(format!("pinnie-pid-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = PidFile::at(dir.join(name));
        file.remove().unwrap();
        file
    }

    #[test]
    fn parse_pid_trims_whitespace() {
        assert_eq!(parse_pid("4242\r\n").unwrap(), 4242);
    }

    #[test]
    fn parse_pid_rejects_garbage_and_zero() {
        assert!(parse_pid("not-a-pid").is_err());
        assert!(parse_pid("0").is_err());
    }

    #[test]
    fn missing_file_reads_as_none() {
        // Arrange
        let file = scratch("missing.pid");

        // Act / Assert
        assert_eq!(file.read().unwrap(), None);
        assert!(file.remove().is_ok());
    }

    #[test]
    fn write_then_read_returns_pid() {
        // Arrange
        let file = scratch("written.pid");

        // Act
        file.write(31337).unwrap();

        // Assert
        assert_eq!(file.read().unwrap(), Some(31337));
        file.remove().unwrap();
        assert!(!file.path().exists());
    }
}
