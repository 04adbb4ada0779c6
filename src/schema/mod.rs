// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declarative record schemas.
//!
//! This module provides:
//! - Textual type descriptors (`mapping<string, sequence<Plan>>`, `string?`)
//! - TOML schema documents declaring records and decoder settings
//! - Loading documents into a [`FieldCodecRegistry`](crate::encoding::FieldCodecRegistry)

pub mod ast;
pub mod loader;
pub mod parser;

pub use ast::{FieldSchema, RecordSchema, SchemaDocument};
pub use loader::{load_str, parse_document};
pub use parser::{parse as parse_descriptor, parse_with_params};
