//! decode
//!
//! Metadata decoding engine.
//!
//! # Modules
//!
//! - [`layout`] - Fixed positional paths, per entity kind
//! - [`types`] - Field type grammar (`#`, `B`, `S`, `N`, `D`)
//! - [`identity`] - Id / name / synonym records
//! - [`sections`] - Identifier-keyed structural section dispatch
//! - [`entities`] - Decoders for the 13 entity kinds
//! - [`recalc`] - Recalculation resolver for calculation registers
//! - [`reader`] - Cancellable blob-to-tree reads and raw text pass-throughs
//! - [`configuration`] - Whole-configuration aggregator
//! - [`cancel`] - Cooperative cancellation
//!
//! # Failure policy
//!
//! Every error aborts the enclosing decode; there is no partial model.
//! Errors raised inside an object are wrapped with the object's kind and
//! identifier, and tree errors carry the absolute path of the offset that
//! did not resolve. Use [`DecodeError::kind`] to classify an error through
//! its context layers.

pub mod cancel;
pub mod configuration;
pub mod entities;
pub mod identity;
pub mod layout;
pub mod reader;
pub mod recalc;
pub mod sections;
pub mod types;

pub use cancel::CancellationToken;
pub use configuration::{decode_configuration, decode_configuration_with, DecodeOptions};
pub use reader::{decode_params_file, decode_schema_storage};

use thiserror::Error;

use crate::core::model::EntityKind;
use crate::core::types::NodePath;
use crate::store::StoreError;
use crate::tree::TreeError;

/// Classification of a [`DecodeError`], independent of context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Io,
    TypeMismatch,
    UnknownFormat,
    StructureMismatch,
    Cancelled,
}

/// Errors from decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A blob or key is missing from the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// Store transport failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// A tree scalar has the wrong kind.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: NodePath,
        expected: &'static str,
        found: String,
    },

    /// A marker or value the decoder does not know.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// A fixed offset did not yield the expected node.
    #[error("structure mismatch at {path}: {detail}")]
    StructureMismatch { path: NodePath, detail: String },

    /// The caller cancelled the decode.
    #[error("decode cancelled")]
    Cancelled,

    /// Error raised while decoding one metadata object.
    #[error("{kind} {id}: {inner}")]
    InObject {
        kind: EntityKind,
        id: String,
        inner: Box<DecodeError>,
    },

    /// Error raised while reading one blob outside any object.
    #[error("blob {key}: {inner}")]
    InBlob { key: String, inner: Box<DecodeError> },
}

impl DecodeError {
    /// Classify this error, looking through context layers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::NotFound(_) => ErrorKind::NotFound,
            DecodeError::Io(_) => ErrorKind::Io,
            DecodeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            DecodeError::UnknownFormat(_) => ErrorKind::UnknownFormat,
            DecodeError::StructureMismatch { .. } => ErrorKind::StructureMismatch,
            DecodeError::Cancelled => ErrorKind::Cancelled,
            DecodeError::InObject { inner, .. } | DecodeError::InBlob { inner, .. } => {
                inner.kind()
            }
        }
    }

    /// Wrap with the kind and identifier of the object being decoded.
    ///
    /// Cancellation is returned unwrapped.
    pub fn in_object(self, kind: EntityKind, id: impl Into<String>) -> Self {
        match self {
            DecodeError::Cancelled => self,
            inner => DecodeError::InObject {
                kind,
                id: id.into(),
                inner: Box::new(inner),
            },
        }
    }

    /// Wrap with the key of the blob being decoded.
    ///
    /// Cancellation is returned unwrapped.
    pub fn in_blob(self, key: impl Into<String>) -> Self {
        match self {
            DecodeError::Cancelled => self,
            inner => DecodeError::InBlob {
                key: key.into(),
                inner: Box::new(inner),
            },
        }
    }

    pub(crate) fn structure(path: &NodePath, detail: impl Into<String>) -> Self {
        DecodeError::StructureMismatch {
            path: path.clone(),
            detail: detail.into(),
        }
    }
}

impl From<TreeError> for DecodeError {
    fn from(e: TreeError) -> Self {
        match e {
            TreeError::NoSuchNode { path } => DecodeError::StructureMismatch {
                path,
                detail: "no node at this offset".into(),
            },
            TreeError::TypeMismatch {
                path,
                expected,
                found,
            } => DecodeError::TypeMismatch {
                path,
                expected,
                found,
            },
        }
    }
}

impl From<StoreError> for DecodeError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { table, key } => DecodeError::NotFound(match key {
                Some(key) => format!("{}/{}", table, key),
                None => table.to_string(),
            }),
            StoreError::Io(message) => DecodeError::Io(message),
        }
    }
}
