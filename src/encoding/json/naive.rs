// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Naive resolution.
//!
//! Decoding from a bare [`RuntimeClass`], the erased form of a descriptor:
//! only the base identity survives, every type argument is gone. This is the
//! situation of a caller that knows "a list" or "a `MultiResult`" but not of
//! what.
//!
//! The shim never guesses. Wherever an erased argument would have driven
//! decoding, the JSON is kept as [`DecodedValue::Raw`]:
//!
//! | class             | decoded as                         |
//! |-------------------|------------------------------------|
//! | `sequence`        | `sequence<any>`                    |
//! | `mapping`         | `mapping<string, any>`             |
//! | `nullable`        | `nullable<any>`                    |
//! | generic record    | record with every parameter `any`  |
//! | plain record      | same as the full decoder           |
//! | primitive         | same as the full decoder           |
//!
//! The information loss surfaces only when a raw value is materialized into
//! a typed target (see [`crate::encoding::typed`]), as
//! `DecodeError::GenericInformationLost`.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use super::decoder::JsonDecoder;
use crate::core::{BaseIdentity, DecodedValue, Result, TypeDescriptor};
use crate::encoding::registry::FieldCodecRegistry;
use crate::encoding::typed::{Described, FromDecoded};

/// Bare runtime class token: a base identity with no type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuntimeClass {
    base: BaseIdentity,
}

impl RuntimeClass {
    pub fn new(base: BaseIdentity) -> Self {
        Self { base }
    }

    /// Runtime class of a Rust type (its descriptor, erased).
    pub fn of<T: Described>() -> Self {
        T::descriptor().erase()
    }

    pub fn base(&self) -> &BaseIdentity {
        &self.base
    }

    /// Best descriptor that can be rebuilt from the class alone.
    ///
    /// Generic records need the registry to know how many parameters to
    /// fill with `any`. Unregistered records are returned bare and fail
    /// later with `UnknownType`.
    pub fn reconstruct(&self, registry: &FieldCodecRegistry) -> TypeDescriptor {
        match &self.base {
            BaseIdentity::Sequence => TypeDescriptor::sequence_of(TypeDescriptor::any()),
            BaseIdentity::Mapping => {
                TypeDescriptor::mapping_of(TypeDescriptor::string(), TypeDescriptor::any())
            }
            BaseIdentity::Nullable => TypeDescriptor::nullable(TypeDescriptor::any()),
            BaseIdentity::Record(name) => {
                let params = registry
                    .lookup(name)
                    .map_or(0, |codec| codec.type_params().len());
                TypeDescriptor::record_with(name.clone(), vec![TypeDescriptor::any(); params])
            }
            BaseIdentity::Param(name) => TypeDescriptor::param(name.clone()),
            base => TypeDescriptor::leaf(base.clone()),
        }
    }
}

impl fmt::Display for RuntimeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base.name())
    }
}

impl From<&TypeDescriptor> for RuntimeClass {
    fn from(descriptor: &TypeDescriptor) -> Self {
        descriptor.erase()
    }
}

impl TypeDescriptor {
    /// Erase the type arguments, keeping only the runtime class.
    pub fn erase(&self) -> RuntimeClass {
        RuntimeClass::new(self.base().clone())
    }
}

impl<'r> JsonDecoder<'r> {
    /// Decode with only a runtime class available.
    ///
    /// Non-generic records and primitives decode exactly as with
    /// [`decode`](Self::decode); containers and generic records keep their
    /// parameter-typed content as untyped JSON.
    pub fn decode_naive(&self, class: &RuntimeClass, node: &Value) -> Result<DecodedValue> {
        let descriptor = class.reconstruct(self.registry());
        debug!(class = %class, rebuilt = %descriptor, "naive decode");
        self.decode(&descriptor, node)
    }

    /// Naive decode, then materialize into `T`.
    ///
    /// Fails with `GenericInformationLost` whenever `T` needs a type the
    /// erased class no longer carries.
    pub fn decode_naive_as<T: FromDecoded>(&self, node: &Value) -> Result<T> {
        let decoded = self.decode_naive(&RuntimeClass::of::<T>(), node)?;
        T::from_decoded(decoded)
    }
}
