//! store::mock
//!
//! Mock store implementation for deterministic testing.
//!
//! # Design
//!
//! The mock store keeps blobs in memory, records every fetch in order, and
//! allows configuring failure scenarios. Clones share state, so a test can
//! hand one clone to the decoder and inspect the other afterwards.
//!
//! # Example
//!
//! ```
//! use cfgmeta::store::mock::MockStore;
//! use cfgmeta::store::{fetch_text, Table};
//!
//! # tokio_test::block_on(async {
//! let store = MockStore::new().with_config("root", "{2,conf}");
//!
//! let text = fetch_text(&store, Table::Config, Some("root")).await.unwrap();
//! assert_eq!(text, "{2,conf}");
//! assert_eq!(store.fetch_count(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::content::deflate_text;
use super::traits::{BlobStore, StoreError, Table};

/// Mock store for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    inner: Arc<Mutex<MockStoreInner>>,
}

#[derive(Debug, Default)]
struct MockStoreInner {
    /// Stored blobs by table and key.
    blobs: HashMap<(Table, String), Vec<u8>>,
    /// The single SchemaStorage row.
    schema: Option<Vec<u8>>,
    /// Keys that fail with the given error.
    fail_on: HashMap<String, StoreError>,
    /// Recorded fetches, in call order.
    fetches: Vec<MockFetch>,
}

/// Recorded fetch for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFetch {
    pub table: Table,
    pub key: Option<String>,
}

impl MockStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a deflated `Config` blob, the encoding the real store uses.
    pub fn with_config(self, key: &str, text: &str) -> Self {
        self.insert(Table::Config, key, deflate(text));
        self
    }

    /// Add an uncompressed `Config` blob.
    ///
    /// The text is stored as UTF-8 behind a byte order mark, which is how
    /// uncompressed blobs appear in the store.
    pub fn with_config_plain(self, key: &str, text: &str) -> Self {
        self.insert(Table::Config, key, with_bom(text));
        self
    }

    /// Add a deflated `Params` blob.
    pub fn with_params(self, key: &str, text: &str) -> Self {
        self.insert(Table::Params, key, deflate(text));
        self
    }

    /// Set the single `SchemaStorage` row (stored uncompressed).
    pub fn with_schema(self, text: &str) -> Self {
        self.lock().schema = Some(with_bom(text));
        self
    }

    /// Configure fetches of `key` (in any table) to fail with `error`.
    ///
    /// # Example
    ///
    /// ```
    /// use cfgmeta::store::mock::MockStore;
    /// use cfgmeta::store::StoreError;
    ///
    /// let store = MockStore::new()
    ///     .fail_on("root", StoreError::Io("connection reset".into()));
    /// ```
    pub fn fail_on(self, key: &str, error: StoreError) -> Self {
        self.lock().fail_on.insert(key.to_string(), error);
        self
    }

    /// Get all recorded fetches.
    pub fn fetches(&self) -> Vec<MockFetch> {
        self.lock().fetches.clone()
    }

    /// Keys of all recorded fetches, in call order.
    pub fn fetched_keys(&self) -> Vec<String> {
        self.lock()
            .fetches
            .iter()
            .filter_map(|f| f.key.clone())
            .collect()
    }

    /// Number of recorded fetches.
    pub fn fetch_count(&self) -> usize {
        self.lock().fetches.len()
    }

    /// Clear recorded fetches.
    pub fn clear_fetches(&self) {
        self.lock().fetches.clear();
    }

    fn insert(&self, table: Table, key: &str, bytes: Vec<u8>) {
        self.lock().blobs.insert((table, key.to_string()), bytes);
    }

    fn lock(&self) -> MutexGuard<'_, MockStoreInner> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Deflate fixture text; compressing into memory does not fail.
fn deflate(text: &str) -> Vec<u8> {
    deflate_text(text).expect("deflating into memory")
}

fn with_bom(text: &str) -> Vec<u8> {
    let mut bytes = "\u{feff}".as_bytes().to_vec();
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

#[async_trait]
impl BlobStore for MockStore {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_blob(&self, table: Table, key: Option<&str>) -> Result<Vec<u8>, StoreError> {
        let mut inner = self.lock();
        inner.fetches.push(MockFetch {
            table,
            key: key.map(str::to_string),
        });

        if let Some(error) = key.and_then(|k| inner.fail_on.get(k)) {
            return Err(error.clone());
        }

        let found = match table {
            Table::SchemaStorage => inner.schema.clone(),
            _ => key.and_then(|k| inner.blobs.get(&(table, k.to_string())).cloned()),
        };

        found.ok_or_else(|| StoreError::NotFound {
            table,
            key: key.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_stored_blob() {
        let store = MockStore::new().with_config_plain("a", "{1}");
        let bytes = store.fetch_blob(Table::Config, Some("a")).await.unwrap();
        assert_eq!(bytes, "\u{feff}{1}".as_bytes());
    }

    #[tokio::test]
    async fn tables_are_separate() {
        let store = MockStore::new().with_config("a", "{1}");
        let err = store.fetch_blob(Table::Params, Some("a")).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                table: Table::Params,
                key: Some("a".into())
            }
        );
    }

    #[tokio::test]
    async fn schema_storage_ignores_key() {
        let store = MockStore::new().with_schema("{schema}");
        assert!(store
            .fetch_blob(Table::SchemaStorage, Some("anything"))
            .await
            .is_ok());
        assert!(store.fetch_blob(Table::SchemaStorage, None).await.is_ok());
    }

    #[tokio::test]
    async fn records_fetches_in_order() {
        let store = MockStore::new().with_config("a", "{}").with_config("b", "{}");
        store.fetch_blob(Table::Config, Some("b")).await.unwrap();
        store.fetch_blob(Table::Config, Some("a")).await.unwrap();
        let _ = store.fetch_blob(Table::Config, Some("c")).await;
        assert_eq!(store.fetched_keys(), vec!["b", "a", "c"]);
        assert_eq!(store.fetch_count(), 3);

        store.clear_fetches();
        assert!(store.fetches().is_empty());
    }

    #[tokio::test]
    async fn fail_on_overrides_stored_blob() {
        let store = MockStore::new()
            .with_config("a", "{}")
            .fail_on("a", StoreError::Io("boom".into()));
        let err = store.fetch_blob(Table::Config, Some("a")).await.unwrap_err();
        assert_eq!(err, StoreError::Io("boom".into()));
    }

    #[test]
    fn clones_share_state() {
        let store = MockStore::new();
        let clone = store.clone().with_config("a", "{}");
        drop(clone);
        assert_eq!(store.lock().blobs.len(), 1);
    }

    #[test]
    fn store_name() {
        assert_eq!(MockStore::new().name(), "mock");
    }
}
