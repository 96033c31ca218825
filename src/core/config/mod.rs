//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Locations
//!
//! An explicit path (`--config`) is used alone and must exist. Otherwise
//! the first existing file of:
//! 1. `$CFGMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cfgmeta/config.toml`
//! 3. `~/.cfgmeta/config.toml`
//!
//! A missing file is not an error; defaults apply.
//!
//! # Example
//!
//! ```no_run
//! use cfgmeta::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("concurrency: {}", config.concurrency());
//! if let Some(dir) = config.store_dir() {
//!     println!("store: {}", dir.display());
//! }
//! ```

pub mod schema;

pub use schema::{DecodeSettings, FileConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: FileConfig,
    /// Path the file was loaded from (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated, or if `explicit` names a file that cannot be read.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::locate(),
        };

        let Some(path) = path else {
            return Ok(Config::default());
        };

        let file = Self::read(&path)?;
        file.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");

        Ok(Config {
            file,
            path: Some(path),
        })
    }

    /// First existing file in the standard locations.
    fn locate() -> Option<PathBuf> {
        let candidates = [
            std::env::var_os("CFGMETA_CONFIG").map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME")
                .map(|xdg| PathBuf::from(xdg).join("cfgmeta/config.toml")),
            dirs::home_dir().map(|home| home.join(".cfgmeta/config.toml")),
        ];
        candidates.into_iter().flatten().find(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Dump directory for the directory store.
    pub fn store_dir(&self) -> Option<&Path> {
        self.file.store_dir.as_deref()
    }

    /// In-flight object fetches per kind.
    ///
    /// Defaults to 1 (sequential) if not configured.
    pub fn concurrency(&self) -> usize {
        self.file
            .decode
            .as_ref()
            .and_then(|d| d.concurrency)
            .unwrap_or(1)
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
