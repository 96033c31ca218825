//! store::content
//!
//! Blob bytes to text.
//!
//! Stored blobs come in two encodings: raw-deflate compressed UTF-8, or
//! plain UTF-8. There is no marker telling them apart, so decompression is
//! attempted first and the raw bytes are used verbatim when it fails.

use std::io::Read;

use flate2::read::DeflateDecoder;

use super::traits::{BlobStore, StoreError, Table};

/// Fetch a blob and return its decoded text.
///
/// # Errors
///
/// Only store errors propagate; a failed decompression is not an error.
pub async fn fetch_text(
    store: &dyn BlobStore,
    table: Table,
    key: Option<&str>,
) -> Result<String, StoreError> {
    let bytes = store.fetch_blob(table, key).await?;
    tracing::debug!(
        store = store.name(),
        %table,
        key = key.unwrap_or("<none>"),
        len = bytes.len(),
        "fetched blob"
    );
    Ok(decode_text(&bytes))
}

/// Decompress-or-passthrough of blob bytes.
pub fn decode_text(bytes: &[u8]) -> String {
    match inflate(bytes) {
        Some(text) => text,
        None => {
            tracing::trace!(len = bytes.len(), "blob is not deflated, reading as plain text");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn inflate(bytes: &[u8]) -> Option<String> {
    let mut out = Vec::new();
    DeflateDecoder::new(bytes).read_to_end(&mut out).ok()?;
    String::from_utf8(out).ok()
}

/// Raw-deflate `text`; the inverse of [`decode_text`] for compressed blobs.
pub fn deflate_text(text: &str) -> std::io::Result<Vec<u8>> {
    use flate2::write::DeflateEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    encoder.finish()
}
