// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Typecodec CLI
//!
//! Decode JSON documents against explicit type descriptors.
//!
//! ## Usage
//!
//! ```sh
//! # Decode a document against a nested generic target
//! typecodec decode --schema links.toml --type "mapping<string, sequence<ReferenceLink>>" input.json
//!
//! # Decode the same document knowing only the runtime class
//! typecodec decode --schema links.toml --type "mapping<string, sequence<ReferenceLink>>" --naive input.json
//!
//! # Normalize a descriptor
//! typecodec describe "map<string, list<ReferenceLink?>>"
//!
//! # Inspect schema documents
//! typecodec schema list links.toml
//! typecodec schema show links.toml ReferenceLink
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, DescribeCmd, SchemaCmd};
use common::Result;

/// Typecodec - descriptor-driven JSON decoding
///
/// Decode JSON into nested generic targets described by record schemas.
#[derive(Parser, Clone)]
#[command(name = "typecodec")]
#[command(about = "Decode JSON against explicit type descriptors", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Decode a JSON document against a type descriptor
    Decode(DecodeCmd),

    /// Parse and normalize a type descriptor
    Describe(DescribeCmd),

    /// Schema document operations (list, show)
    #[command(subcommand)]
    Schema(SchemaCmd),
}

fn run() -> Result<()> {
    common::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(cmd) => cmd.run(),
        Commands::Describe(cmd) => cmd.run(),
        Commands::Schema(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
