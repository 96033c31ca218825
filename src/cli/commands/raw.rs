//! params / schema commands - Print raw auxiliary text from the store

use crate::cli::Context;
use crate::decode::{decode_params_file, decode_schema_storage};
use anyhow::{Context as _, Result};

/// Print a file from the `Params` table.
pub fn params(ctx: &Context, file: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let rt = tokio::runtime::Runtime::new()?;
    let text = rt
        .block_on(decode_params_file(&store, file))
        .with_context(|| format!("failed to read params file '{}'", file))?;
    print!("{}", text);
    Ok(())
}

/// Print the current schema.
pub fn schema(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let rt = tokio::runtime::Runtime::new()?;
    let text = rt
        .block_on(decode_schema_storage(&store))
        .context("failed to read schema storage")?;
    print!("{}", text);
    Ok(())
}
