//! decode::reader
//!
//! Blob fetches as seen by the decoder: cancellable, decompressed and
//! parsed into trees. Also hosts the two raw text pass-throughs.

use super::{CancellationToken, DecodeError};
use crate::store::{fetch_text, BlobStore, Table};
use crate::tree::Node;

/// Cancellable tree reads from the `Config` table.
#[derive(Clone, Copy)]
pub struct Reader<'a> {
    store: &'a dyn BlobStore,
    cancel: &'a CancellationToken,
}

impl<'a> Reader<'a> {
    pub fn new(store: &'a dyn BlobStore, cancel: &'a CancellationToken) -> Self {
        Self { store, cancel }
    }

    pub fn cancel_token(&self) -> &'a CancellationToken {
        self.cancel
    }

    /// Fetch a configuration blob and parse it.
    ///
    /// Cancellation is checked before the fetch is issued.
    pub async fn fetch_tree(&self, key: &str) -> Result<Node, DecodeError> {
        self.cancel.check()?;
        let text = fetch_text(self.store, Table::Config, Some(key)).await?;
        Node::parse(&text).map_err(|e| {
            DecodeError::UnknownFormat(format!("blob {} is not a bracket tree: {}", key, e))
        })
    }
}

/// Text of a file in the `Params` table.
pub async fn decode_params_file(
    store: &dyn BlobStore,
    file_name: &str,
) -> Result<String, DecodeError> {
    tracing::debug!(file = file_name, "reading params file");
    Ok(fetch_text(store, Table::Params, Some(file_name)).await?)
}

/// Text of the current schema.
pub async fn decode_schema_storage(store: &dyn BlobStore) -> Result<String, DecodeError> {
    tracing::debug!("reading schema storage");
    Ok(fetch_text(store, Table::SchemaStorage, None).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ErrorKind;
    use crate::store::mock::MockStore;

    #[tokio::test]
    async fn fetch_tree_parses_deflated_blob() {
        let store = MockStore::new().with_config("k", "{1,{2}}");
        let cancel = CancellationToken::new();
        let tree = Reader::new(&store, &cancel).fetch_tree("k").await.unwrap();
        assert_eq!(tree.cursor().at(&[1, 0]).unwrap().as_int().unwrap(), 2);
    }

    #[tokio::test]
    async fn fetch_tree_checks_cancellation_first() {
        let store = MockStore::new().with_config("k", "{1}");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = Reader::new(&store, &cancel).fetch_tree("k").await.unwrap_err();
        assert_eq!(err, DecodeError::Cancelled);
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn fetch_tree_rejects_non_tree_text() {
        let store = MockStore::new().with_config("k", "not a tree");
        let cancel = CancellationToken::new();
        let err = Reader::new(&store, &cancel).fetch_tree("k").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownFormat);
        assert!(err.to_string().contains("blob k"));
    }

    #[tokio::test]
    async fn missing_blob_is_not_found() {
        let store = MockStore::new();
        let cancel = CancellationToken::new();
        let err = Reader::new(&store, &cancel).fetch_tree("k").await.unwrap_err();
        assert_eq!(err, DecodeError::NotFound("Config/k".into()));
    }

    #[tokio::test]
    async fn params_and_schema_pass_text_through() {
        let store = MockStore::new()
            .with_params("DBNames", "{names}")
            .with_schema("<schema/>");
        assert_eq!(decode_params_file(&store, "DBNames").await.unwrap(), "{names}");
        assert_eq!(decode_schema_storage(&store).await.unwrap(), "\u{feff}<schema/>");
        let err = decode_params_file(&store, "missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
