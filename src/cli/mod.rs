//! cli
//!
//! Command-line interface layer for cfgmeta.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging
//! - Resolve the store from flags and the config file
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`crate::decode`]. Commands build their own tokio runtime since the
//! binary itself is synchronous.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::store::DirStore;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded config file
    pub config: Config,
    /// Dump directory from `--store`, if given
    pub store: Option<PathBuf>,
    pub debug: bool,
    pub quiet: bool,
}

impl Context {
    /// Directory store for the resolved dump directory.
    ///
    /// `--store` overrides `store_dir` from the config file.
    pub fn open_store(&self) -> Result<DirStore> {
        let dir = self
            .store
            .as_deref()
            .or_else(|| self.config.store_dir())
            .context("no store directory: pass --store or set store_dir in the config file")?;
        anyhow::ensure!(
            dir.is_dir(),
            "store directory '{}' does not exist",
            dir.display()
        );
        Ok(DirStore::new(dir))
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug, cli.quiet);

    let config = Config::load(cli.config.as_deref())?;
    let ctx = Context {
        config,
        store: cli.store.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Log to stderr. `RUST_LOG` wins over the flags when set.
fn init_logging(debug: bool, quiet: bool) {
    let default = if debug {
        "cfgmeta=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
