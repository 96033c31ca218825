//! core
//!
//! Core domain types and runtime configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ObjectId, NodePath
//! - [`model`] - Decoded configuration model: entity kinds, identities, type descriptors
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - The model is plain data; decoding lives in [`crate::decode`]

pub mod config;
pub mod model;
pub mod types;
