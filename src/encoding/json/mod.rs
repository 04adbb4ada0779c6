// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON encoding support.
//!
//! - [`JsonDecoder`] - descriptor-driven decoding
//! - [`RuntimeClass`] - naive resolution from an erased descriptor
//! - [`JsonEncoder`] - decoded values back to JSON
//! - [`DecoderBuilder`] - decoder configuration

pub mod builder;
pub mod decoder;
pub mod encoder;
pub mod naive;

pub use builder::{DecoderBuilder, DecoderConfig, NullPolicy, UnknownFieldPolicy};
pub use decoder::JsonDecoder;
pub use encoder::JsonEncoder;
pub use naive::RuntimeClass;
