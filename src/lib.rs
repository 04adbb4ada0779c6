// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Typecodec
//!
//! Generic-aware JSON decoding driven by explicit type descriptors.
//!
//! Decoding `{"key": [{...}]}` into a "mapping of string to list of records"
//! needs more than the container's own type: the element type has to come
//! from somewhere. Here it comes from a [`TypeDescriptor`], an inspectable
//! value that spells out the whole target, nested generic arguments
//! included. One recursive decoder walks the descriptor and the JSON tree in
//! lock-step, so every nesting shape is handled by the same code.
//!
//! ## Architecture
//!
//! - `core/` - descriptors, decoded values, errors and locations
//! - `encoding/` - field codecs, the codec registry, the JSON decoder and
//!   encoder, naive (erased) resolution, typed materialization
//! - `schema/` - descriptor text parsing and TOML record schemas
//!
//! ## Example: Decoding with a schema
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use typecodec::encoding::json::JsonDecoder;
//! use typecodec::TypeDescriptor;
//!
//! let (_, registry) = typecodec::schema::load_str(
//!     r#"
//! [[record]]
//! name = "Version"
//!
//! [[record.field]]
//! name = "major"
//! type = "int32"
//! "#,
//! )?;
//!
//! let decoder = JsonDecoder::new(&registry);
//! let target: TypeDescriptor = "mapping<string, sequence<Version>>".parse()?;
//! let decoded = decoder.decode_str(&target, r#"{"key": [{"major": 3}]}"#)?;
//! assert_eq!(decoded.get("key").and_then(|v| v.len()), Some(1));
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    BaseIdentity, DecodeError, DecodedMap, DecodedValue, FieldValues, Location, MapKey, Record,
    Result, Segment, TypeDescriptor,
};

// Codecs, registry and JSON decoding
pub mod encoding;

pub use encoding::{
    DecoderBuilder, DecoderConfig, Described, FieldCodec, FieldCodecRegistry, FromDecoded,
    JsonDecoder, JsonEncoder, RuntimeClass,
};

// Declarative schemas
pub mod schema;
