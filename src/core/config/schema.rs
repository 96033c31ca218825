//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Values are validated after parsing; unknown keys are rejected by serde.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Runtime configuration file.
///
/// # Example
///
/// ```toml
/// store_dir = "/var/lib/cfgmeta/dump"
///
/// [decode]
/// concurrency = 4
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Dump directory read by the directory store
    pub store_dir: Option<PathBuf>,

    /// Decoder settings
    pub decode: Option<DecodeSettings>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.store_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "store_dir cannot be empty".to_string(),
                ));
            }
        }

        if let Some(decode) = &self.decode {
            decode.validate()?;
        }

        Ok(())
    }
}

/// `[decode]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeSettings {
    /// In-flight object fetches per entity kind (1 = sequential)
    pub concurrency: Option<usize>,
}

impl DecodeSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == Some(0) {
            return Err(ConfigError::InvalidValue(
                "decode.concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
