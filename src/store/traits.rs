//! store::traits
//!
//! Store trait definition for reading raw configuration blobs.
//!
//! # Design
//!
//! The `BlobStore` trait is async because every read is a round trip to the
//! database (or disk). Reads are the only suspension points of a decode.
//! The store is read-only and shared by reference with every fetch; no
//! locking is needed because nothing writes while a decode runs.
//!
//! # Tables
//!
//! - `Config` - configuration files keyed by file name
//! - `Params` - auxiliary parameter files keyed by file name
//! - `SchemaStorage` - a single row holding the current schema; ignores key

use async_trait::async_trait;
use thiserror::Error;

/// Table a blob is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Config,
    Params,
    SchemaStorage,
}

impl Table {
    /// Table name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Config => "Config",
            Table::Params => "Params",
            Table::SchemaStorage => "SchemaStorage",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No row matches the key.
    #[error("no blob in {table} for key {}", key.as_deref().unwrap_or("<none>"))]
    NotFound { table: Table, key: Option<String> },

    /// Transport or storage failure.
    #[error("store I/O error: {0}")]
    Io(String),
}

/// Read access to the raw blob tables.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one handle can serve several
/// in-flight fetches when decoding fans out.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store name for diagnostics (e.g., "dir", "mock").
    fn name(&self) -> &'static str;

    /// Fetch the raw bytes of one blob.
    ///
    /// `key` is the file name for `Config` and `Params`; `SchemaStorage`
    /// has exactly one row and ignores it.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no row matches
    /// - `Io` on transport failure
    async fn fetch_blob(&self, table: Table, key: Option<&str>) -> Result<Vec<u8>, StoreError>;
}
