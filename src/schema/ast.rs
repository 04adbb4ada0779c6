// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema document types.
//!
//! A schema document is a TOML file declaring record types and, optionally,
//! decoder settings:
//!
//! ```toml
//! [decoder]
//! unknown_fields = "reject"
//!
//! [[record]]
//! name = "MultiResult"
//! params = ["T"]
//!
//! [[record.field]]
//! name = "result"
//! type = "sequence<T>"
//! ```

use serde::{Deserialize, Serialize};

use crate::encoding::json::DecoderConfig;

/// Top-level schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Decoder settings (`[decoder]` table)
    #[serde(default)]
    pub decoder: Option<DecoderConfig>,
    /// Record declarations (`[[record]]` tables), in file order
    #[serde(default, rename = "record")]
    pub records: Vec<RecordSchema>,
}

impl SchemaDocument {
    /// Get a record declaration by name.
    pub fn get(&self, name: &str) -> Option<&RecordSchema> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Record names, in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }
}

/// A record declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSchema {
    /// Record identity
    pub name: String,
    /// Generic parameter names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
    /// Fields (`[[record.field]]` tables), in declaration order
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldSchema>,
}

impl RecordSchema {
    /// Check if the record declares type parameters.
    pub fn is_generic(&self) -> bool {
        !self.params.is_empty()
    }
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSchema {
    /// JSON key
    pub name: String,
    /// Descriptor text, e.g. `sequence<T>` or `string?`
    #[serde(rename = "type")]
    pub ty: String,
    /// Key may be missing or null
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}
