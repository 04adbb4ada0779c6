// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoding layer.
//!
//! - [`codec`] - field codecs describing record types
//! - [`registry`] - record identity to codec lookup
//! - [`json`] - descriptor-driven JSON decoding and re-encoding
//! - [`typed`] - descriptors and conversions for Rust types

pub mod codec;
pub mod json;
pub mod registry;
pub mod typed;

pub use codec::{Constructor, FieldCodec, FieldCodecBuilder, FieldSpec, Presence};
pub use json::{
    DecoderBuilder, DecoderConfig, JsonDecoder, JsonEncoder, NullPolicy, RuntimeClass,
    UnknownFieldPolicy,
};
pub use registry::{global_registry, install_global, FieldCodecRegistry};
pub use typed::{Described, FromDecoded, FromMapKey};
