//! cfgmeta - Read-only decoder for business-application configuration metadata
//!
//! A configuration is stored as a set of blobs, each holding a positional
//! bracket tree. This crate fetches those blobs, walks the trees at fixed
//! offsets and produces a typed model of the configuration: catalogs,
//! documents, registers and the other metadata objects, together with
//! their requisites, tabular sections and field types.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to decode)
//! - [`decode`] - Decoding engine: type grammar, section dispatch, entity decoders
//! - [`tree`] - Positional bracket tree and its parser
//! - [`store`] - Blob store seam and content retrieval
//! - [`core`] - Domain model, strong types and configuration
//!
//! # Correctness Invariants
//!
//! 1. Every value is read at a fixed offset; an offset that does not resolve
//!    is an error naming the full path, never a default
//! 2. Objects keep the order in which the configuration lists them
//! 3. A decode either yields the whole model or fails
//!
//! # Example
//!
//! ```no_run
//! use cfgmeta::decode::{decode_configuration, CancellationToken};
//! use cfgmeta::store::DirStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DirStore::new("/var/lib/cfgmeta/dump");
//! let model = decode_configuration(&store, &CancellationToken::new()).await?;
//! for catalog in &model.catalogs {
//!     println!("{}", catalog.identity.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod decode;
pub mod store;
pub mod tree;
