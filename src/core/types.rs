//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ObjectId`] - Opaque identifier of a metadata object or blob key
//! - [`NodePath`] - Positional address of a node inside a tree
//!
//! # Examples
//!
//! ```
//! use cfgmeta::core::types::{NodePath, ObjectId};
//!
//! let id = ObjectId::new("157fa490-4ce9-11d4-9415-008048da11f9").unwrap();
//! assert_eq!(id.as_str(), "157fa490-4ce9-11d4-9415-008048da11f9");
//!
//! let path = NodePath::from(&[3, 1, 19][..]);
//! assert_eq!(path.to_string(), "3.1.19");
//!
//! assert!(ObjectId::new("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),
}

/// An opaque object identifier.
///
/// Identifiers are usually GUID-shaped but the decoder never interprets
/// them: they are compared, printed and used as blob keys, nothing else.
/// The only constraints are that the token is non-empty and free of
/// whitespace and control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Create a new validated identifier.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidObjectId` if the token is empty or contains
    /// whitespace/control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidObjectId(
                "object id cannot be empty".into(),
            ));
        }
        if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidObjectId(format!(
                "object id cannot contain whitespace: {:?}",
                id
            )));
        }
        Ok(Self(id))
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positional address of a node, as a sequence of child indices from a root.
///
/// Displayed as dot-separated indices (`3.1.19`); the empty path displays
/// as `<root>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The empty path (the root node itself).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Return a new path extended by `indices`.
    pub fn join(&self, indices: &[usize]) -> Self {
        let mut path = self.0.clone();
        path.extend_from_slice(indices);
        Self(path)
    }

    /// Indices of this path.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Check whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[usize]> for NodePath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod object_id {
        use super::*;

        #[test]
        fn accepts_guid() {
            let id = ObjectId::new("cf4abea7-37b2-11d4-940f-008048da11f9").unwrap();
            assert_eq!(id.to_string(), "cf4abea7-37b2-11d4-940f-008048da11f9");
        }

        #[test]
        fn accepts_arbitrary_token() {
            assert!(ObjectId::new("root").is_ok());
            assert!(ObjectId::new("abc.1").is_ok());
        }

        #[test]
        fn rejects_empty() {
            assert!(ObjectId::new("").is_err());
        }

        #[test]
        fn rejects_whitespace() {
            assert!(ObjectId::new("a b").is_err());
            assert!(ObjectId::new("a\n").is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let id = ObjectId::new("abc").unwrap();
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"abc\"");
            let parsed: ObjectId = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, id);
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<ObjectId, _> = serde_json::from_str("\"\"");
            assert!(result.is_err());
        }
    }

    mod node_path {
        use super::*;

        #[test]
        fn display_dotted() {
            assert_eq!(NodePath::from(vec![1, 9, 1]).to_string(), "1.9.1");
        }

        #[test]
        fn display_root() {
            assert_eq!(NodePath::root().to_string(), "<root>");
            assert!(NodePath::root().is_root());
        }

        #[test]
        fn join_extends() {
            let base = NodePath::from(vec![3]);
            let joined = base.join(&[1, 2]);
            assert_eq!(joined.indices(), &[3, 1, 2]);
            assert_eq!(base.indices(), &[3]);
        }
    }
}
