//! store
//!
//! Access to the raw blob tables a configuration is stored in.
//!
//! # Modules
//!
//! - [`traits`] - `BlobStore` trait, `Table`, `StoreError`
//! - [`content`] - Decompress-or-passthrough text retrieval
//! - [`dir`] - Store backed by a directory dump
//! - [`mock`] - In-memory store for tests
//!
//! # Architecture
//!
//! The decoder never touches a connection directly. It receives a
//! `&dyn BlobStore` and goes through [`fetch_text`] for every read, so the
//! transport can be swapped without touching decoding logic.

pub mod content;
pub mod dir;
pub mod mock;
pub mod traits;

pub use content::{decode_text, deflate_text, fetch_text};
pub use dir::DirStore;
pub use traits::{BlobStore, StoreError, Table};
