//! decode::identity
//!
//! Identity records: id, name and optional synonym.
//!
//! ```text
//! {<header>, {<..>, <..>, <id>}, "<name>", {<present>, "<lang>", "<synonym>"}, ...}
//! ```
//!
//! Top-level objects are keyed by the identifier listed in the
//! configuration, so only nested records read their own id at [`ID`].
//!
//! [`ID`]: crate::decode::layout::identity::ID

use super::layout::identity as offsets;
use super::DecodeError;
use crate::core::model::Identity;
use crate::core::types::ObjectId;
use crate::tree::Cursor;

/// Decode an identity record whose id is known from elsewhere.
pub fn decode_identity_with_id(record: &Cursor<'_>, id: ObjectId) -> Result<Identity, DecodeError> {
    let name = record.at(offsets::NAME)?.as_str()?;
    let synonym = decode_synonym(&record.at(offsets::SYNONYM)?)?;
    Ok(Identity::new(id, name, synonym))
}

/// Decode an identity record that carries its own id.
pub fn decode_identity(record: &Cursor<'_>) -> Result<Identity, DecodeError> {
    let id = object_id(&record.at(offsets::ID)?)?;
    decode_identity_with_id(record, id)
}

/// Decode a synonym record.
///
/// A presence flag of 0 means no synonym; otherwise the text node must
/// exist and is returned verbatim, empty strings included.
pub fn decode_synonym(record: &Cursor<'_>) -> Result<Option<String>, DecodeError> {
    if record.at(offsets::SYNONYM_PRESENT)?.as_int()? == 0 {
        return Ok(None);
    }
    Ok(Some(record.at(offsets::SYNONYM_TEXT)?.as_str()?.to_string()))
}

/// Read a scalar node as an object identifier.
pub fn object_id(node: &Cursor<'_>) -> Result<ObjectId, DecodeError> {
    let raw = node.as_str()?;
    ObjectId::new(raw).map_err(|e| {
        DecodeError::UnknownFormat(format!("{} at {}", e, node.path()))
    })
}
