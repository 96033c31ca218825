//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file instead of the standard locations
//! - `--store <dir>`: Dump directory to read blobs from
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Errors only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cfgmeta - Decode configuration metadata from a blob dump
#[derive(Parser, Debug)]
#[command(name = "cfgmeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dump directory holding Config/, Params/ and SchemaStorage
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode the configuration and print its objects
    #[command(
        name = "dump",
        long_about = "Decode the configuration and print its objects.\n\n\
            Reads the root blob, the configuration tree and the tree of every \
            listed object. Prints the configuration properties followed by the \
            objects of each kind in the order the configuration lists them. \
            Any decode failure aborts with the kind, identifier and tree path \
            of the offset that broke.",
        after_help = "\
EXAMPLES:
    # Summary of every kind
    cfgmeta --store ./dump dump

    # Full model for scripting
    cfgmeta --store ./dump dump --json > model.json

    # Fetch up to 8 objects of a kind at a time
    cfgmeta --store ./dump dump --concurrency 8"
    )]
    Dump {
        /// Print the full model as JSON
        #[arg(long)]
        json: bool,

        /// In-flight object fetches per kind (overrides the config file)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
        concurrency: Option<u16>,
    },

    /// Print the text of a file from the Params table
    #[command(name = "params")]
    Params {
        /// File name (key) in the Params table
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Print the text of the current schema
    #[command(name = "schema")]
    Schema,
}
