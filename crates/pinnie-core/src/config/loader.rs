use std::fmt;
use std::io;
use std::path::PathBuf;

use super::Config;

/// Returns the config directory: `~/.config/pinnie/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("pinnie"))
}

/// Returns the config file path: `~/.config/pinnie/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Why `config.toml` could not be turned into a [`Config`].
#[derive(Debug)]
pub enum LoadError {
    /// No home directory, or no file at the expected path.
    Missing,
    Io(PathBuf, io::Error),
    Parse(PathBuf, toml::de::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("config file not found"),
            Self::Io(path, e) => write!(f, "{}: {e}", path.display()),
            Self::Parse(path, e) => write!(f, "{}: {e}", path.display()),
        }
    }
}

impl std::error::Error for LoadError {}

/// Reads and parses `config.toml`.
pub fn try_load() -> Result<Config, LoadError> {
    let path = config_path().ok_or(LoadError::Missing)?;
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(LoadError::Missing),
        Err(e) => return Err(LoadError::Io(path, e)),
    };
    parse(&content).map_err(|e| LoadError::Parse(path, e))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently yields defaults; a broken one is reported on
/// stderr and in the log.
pub fn load() -> Config {
    match try_load() {
        Ok(config) => config,
        Err(LoadError::Missing) => Config::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            crate::log_warn!("Config load failed, using defaults: {e}");
            Config::default()
        }
    }
}

/// Parses config file contents and clamps values via [`Config::validate`].
pub(super) fn parse(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}
