//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the store from the context
//! 2. Runs the decode on a tokio runtime
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Every store read is async. Handlers build a runtime and `block_on` the
//! async part so the dispatch itself stays synchronous.

mod dump;
mod raw;

// Re-export command functions for testing and direct invocation
pub use dump::dump;
pub use raw::{params, schema};

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Dump { json, concurrency } => dump::dump(ctx, json, concurrency.map(usize::from)),
        Command::Params { file } => raw::params(ctx, &file),
        Command::Schema => raw::schema(ctx),
    }
}
