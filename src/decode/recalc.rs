//! decode::recalc
//!
//! Recalculations of calculation registers.
//!
//! A calculation register lists its recalculations only by blob key; each
//! one lives in a separate object tree with its identity at
//! [`RECALCULATION_IDENTITY`].
//!
//! [`RECALCULATION_IDENTITY`]: crate::decode::layout::RECALCULATION_IDENTITY

use super::identity::decode_identity;
use super::layout::RECALCULATION_IDENTITY;
use super::reader::Reader;
use super::DecodeError;
use crate::core::model::Recalculation;
use crate::core::types::ObjectId;

/// Fetch and decode every recalculation, one fetch per key, in key order.
pub async fn resolve_recalculations(
    reader: &Reader<'_>,
    keys: &[ObjectId],
) -> Result<Vec<Recalculation>, DecodeError> {
    let mut recalculations = Vec::with_capacity(keys.len());
    for key in keys {
        let recalculation = resolve_one(reader, key)
            .await
            .map_err(|e| e.in_blob(key.as_str()))?;
        recalculations.push(recalculation);
    }
    Ok(recalculations)
}

async fn resolve_one(reader: &Reader<'_>, key: &ObjectId) -> Result<Recalculation, DecodeError> {
    let tree = reader.fetch_tree(key.as_str()).await?;
    let identity = decode_identity(&tree.cursor().at(RECALCULATION_IDENTITY)?)?;
    Ok(Recalculation { identity })
}
