// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout typecodec.
//!
//! This module provides the foundational types for the library:
//! - [`DecodeError`] - Error taxonomy for describing and decoding
//! - [`Location`] - JSON pointer and descriptor path of a failure
//! - [`TypeDescriptor`] - Explicit description of a decode target
//! - [`DecodedValue`] - Typed value tree produced by decoding

pub mod descriptor;
pub mod error;
pub mod location;
pub mod value;

pub use descriptor::{BaseIdentity, TypeDescriptor};
pub use error::{DecodeError, Result};
pub use location::{Location, Segment};
pub use value::{DecodedMap, DecodedValue, FieldValues, MapKey, Record};
