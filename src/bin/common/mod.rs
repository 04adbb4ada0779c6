// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use typecodec::schema::{parse_document, SchemaDocument};
use typecodec::{DecoderConfig, FieldCodecRegistry};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the log subscriber. Filter comes from `RUST_LOG`, default `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Schema documents loaded into one registry.
#[derive(Debug)]
pub struct LoadedSchemas {
    pub documents: Vec<(PathBuf, SchemaDocument)>,
    pub registry: FieldCodecRegistry,
}

impl LoadedSchemas {
    /// Decoder settings of the last document that declares a `[decoder]` table.
    pub fn decoder_config(&self) -> DecoderConfig {
        self.documents
            .iter()
            .rev()
            .find_map(|(_, doc)| doc.decoder.clone())
            .unwrap_or_default()
    }
}

/// Read and register schema documents, in the order given.
pub fn load_schemas(paths: &[PathBuf]) -> Result<LoadedSchemas> {
    let mut registry = FieldCodecRegistry::new();
    let mut documents = Vec::with_capacity(paths.len());

    for path in paths {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read schema {}: {e}", path.display()))?;
        let document = parse_document(&text)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
        document
            .register_into(&mut registry)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
        documents.push((path.clone(), document));
    }

    Ok(LoadedSchemas {
        documents,
        registry,
    })
}

/// Read JSON input from a file, or stdin when the path is absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_load_schemas_merges_documents() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.toml");
        let second = dir.path().join("b.toml");
        std::fs::write(&first, "[[record]]\nname = \"A\"\n").unwrap();
        std::fs::write(
            &second,
            "[decoder]\nmax_depth = 8\n\n[[record]]\nname = \"B\"\n",
        )
        .unwrap();

        let loaded = load_schemas(&[first, second]).unwrap();
        assert_eq!(loaded.registry.len(), 2);
        assert_eq!(loaded.decoder_config().max_depth, 8);
    }

    #[test]
    fn test_load_schemas_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[record]]").unwrap();
        let err = load_schemas(&[file.path().to_path_buf()]).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        assert_eq!(read_input(Some(file.path())).unwrap(), "[1, 2]");
    }
}
