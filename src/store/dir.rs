//! store::dir
//!
//! Store backed by a directory dump of the blob tables.
//!
//! # Layout
//!
//! ```text
//! <root>/Config/<file name>
//! <root>/Params/<file name>
//! <root>/SchemaStorage
//! ```
//!
//! Each file holds the raw `BinaryData` of one row, exactly as stored.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::traits::{BlobStore, StoreError, Table};

/// Directory-backed blob store.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Create a store reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the dump.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path of a blob, or `None` if the key is not a plain file name.
    fn blob_path(&self, table: Table, key: Option<&str>) -> Option<PathBuf> {
        match table {
            Table::SchemaStorage => Some(self.root.join(table.as_str())),
            Table::Config | Table::Params => {
                let key = key?;
                let mut components = Path::new(key).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(_)), None) => {
                        Some(self.root.join(table.as_str()).join(key))
                    }
                    _ => None,
                }
            }
        }
    }
}

#[async_trait]
impl BlobStore for DirStore {
    fn name(&self) -> &'static str {
        "dir"
    }

    async fn fetch_blob(&self, table: Table, key: Option<&str>) -> Result<Vec<u8>, StoreError> {
        let not_found = || StoreError::NotFound {
            table,
            key: key.map(str::to_string),
        };

        let path = self.blob_path(table, key).ok_or_else(not_found)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(StoreError::Io(format!(
                "failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}
