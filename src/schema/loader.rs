// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema document loading.
//!
//! Turns TOML schema text into field codecs and registers them. Reading the
//! files is left to the caller.

use tracing::debug;

use super::ast::{RecordSchema, SchemaDocument};
use super::parser::parse_with_params;
use crate::core::{DecodeError, Result};
use crate::encoding::codec::FieldCodec;
use crate::encoding::registry::FieldCodecRegistry;

/// Parse a schema document from TOML text.
///
/// # Errors
///
/// Returns `DecodeError::Parse` (context "schema document") for invalid TOML
/// or unknown keys.
pub fn parse_document(text: &str) -> Result<SchemaDocument> {
    toml::from_str(text).map_err(|e| DecodeError::parse("schema document", e.to_string()))
}

impl RecordSchema {
    /// Build the field codec for this declaration.
    ///
    /// `optional` fields become nullable-optional fields: the key may be
    /// missing or null and decodes to `Absent` either way.
    pub fn to_codec(&self) -> Result<FieldCodec> {
        let mut builder = FieldCodec::builder(self.name.clone());
        for param in &self.params {
            builder = builder.type_param(param.clone());
        }

        for field in &self.fields {
            let descriptor = parse_with_params(&field.ty, &self.params).map_err(|e| {
                DecodeError::parse(
                    format!("record '{}' field '{}'", self.name, field.name),
                    e.to_string(),
                )
            })?;
            builder = if field.optional {
                builder.nullable_field(field.name.clone(), descriptor)
            } else {
                builder.field(field.name.clone(), descriptor)
            };
        }

        builder.build()
    }
}

impl SchemaDocument {
    /// Register every record of the document, in file order.
    ///
    /// Stops at the first invalid declaration or duplicate identity; records
    /// registered before that point stay registered.
    pub fn register_into(&self, registry: &mut FieldCodecRegistry) -> Result<usize> {
        for record in &self.records {
            let codec = record.to_codec()?;
            registry.register(codec)?;
        }
        debug!(records = self.records.len(), "loaded schema document");
        Ok(self.records.len())
    }
}

/// Parse a schema document and register its records into a new registry.
pub fn load_str(text: &str) -> Result<(SchemaDocument, FieldCodecRegistry)> {
    let document = parse_document(text)?;
    let mut registry = FieldCodecRegistry::new();
    document.register_into(&mut registry)?;
    Ok((document, registry))
}
