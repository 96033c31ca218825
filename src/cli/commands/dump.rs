//! dump command - Decode the configuration and print its objects
//!
//! Ctrl-C cancels the decode between fetches; the command then fails with
//! `decode cancelled`.

use crate::cli::Context;
use crate::core::model::{ConfigurationModel, EntityKind};
use crate::decode::{decode_configuration_with, CancellationToken, DecodeOptions};
use anyhow::{Context as _, Result};

/// Decode and print the configuration.
///
/// `concurrency` overrides the config file.
pub fn dump(ctx: &Context, json: bool, concurrency: Option<usize>) -> Result<()> {
    let store = ctx.open_store()?;
    let options = DecodeOptions {
        concurrency: concurrency.unwrap_or_else(|| ctx.config.concurrency()),
    };

    let rt = tokio::runtime::Runtime::new()?;
    let model = rt.block_on(async {
        let cancel = CancellationToken::new();
        let watcher = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("interrupted, cancelling decode");
                    cancel.cancel();
                }
            })
        };
        let result = decode_configuration_with(&store, &cancel, options).await;
        watcher.abort();
        result
    });
    let model = model.with_context(|| {
        format!("failed to decode configuration from '{}'", store.root().display())
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        print_summary(&model);
    }
    Ok(())
}

fn print_summary(model: &ConfigurationModel) {
    match &model.synonym {
        Some(synonym) => println!("Configuration: {} ({})", model.name, synonym),
        None => println!("Configuration: {}", model.name),
    }
    if !model.version.is_empty() {
        println!("Version: {}", model.version);
    }
    if !model.supplier.is_empty() {
        println!("Supplier: {}", model.supplier);
    }
    println!("Compatibility: {}", model.compatibility_mode);
    println!("Data locking: {:?}", model.data_locking_mode);

    for kind in EntityKind::ALL {
        let count = model.count_of(kind);
        if count == 0 {
            continue;
        }
        println!();
        println!("{} ({})", kind, count);
        for item in model.objects().filter(|item| item.kind() == kind) {
            let identity = item.identity();
            match &identity.synonym {
                Some(synonym) if !synonym.is_empty() => {
                    println!("  {}  {}", identity.name, synonym)
                }
                _ => println!("  {}", identity.name),
            }
        }
    }
}
