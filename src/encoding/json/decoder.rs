// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Descriptor-driven JSON decoder
//!
//! One recursive routine, parametrized by a [`TypeDescriptor`], turns a
//! `serde_json::Value` into a [`DecodedValue`]. Because the target shape is
//! data rather than a compiled generic instantiation, the same code decodes
//! `mapping<string, sequence<ReferenceLink>>` and
//! `sequence<mapping<string, ReferenceLink>>`.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use typecodec::encoding::json::JsonDecoder;
//! use typecodec::encoding::{FieldCodec, FieldCodecRegistry};
//! use typecodec::TypeDescriptor;
//!
//! let mut registry = FieldCodecRegistry::new();
//! registry.register(
//!     FieldCodec::builder("Version")
//!         .field("major", TypeDescriptor::int32())
//!         .field("minor", TypeDescriptor::int32())
//!         .build()?,
//! )?;
//!
//! let decoder = JsonDecoder::new(&registry);
//! let target = TypeDescriptor::mapping_of(
//!     TypeDescriptor::string(),
//!     TypeDescriptor::sequence_of(TypeDescriptor::record("Version")),
//! );
//! let decoded = decoder.decode_str(&target, r#"{"key": [{"major": 1, "minor": 0}]}"#)?;
//! let major = decoded.get("key").and_then(|v| v.index(0)).and_then(|v| v.get("major"));
//! assert_eq!(major.and_then(|v| v.as_i64()), Some(1));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use rayon::prelude::*;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use super::builder::{DecoderConfig, NullPolicy, UnknownFieldPolicy};
use crate::core::{
    BaseIdentity, DecodeError, DecodedMap, DecodedValue, FieldValues, Location, MapKey, Result,
    Segment, TypeDescriptor,
};
use crate::encoding::codec::Presence;
use crate::encoding::registry::{global_registry, FieldCodecRegistry};
use crate::encoding::typed::FromDecoded;

/// JSON decoder bound to a field codec registry.
///
/// The decoder only reads the registry, so one decoder (or many) can be used
/// from several threads at once.
#[derive(Debug, Clone)]
pub struct JsonDecoder<'r> {
    registry: &'r FieldCodecRegistry,
    config: DecoderConfig,
}

impl<'r> JsonDecoder<'r> {
    /// Create a decoder with the default configuration.
    pub fn new(registry: &'r FieldCodecRegistry) -> Self {
        Self::with_config(registry, DecoderConfig::default())
    }

    /// Create a decoder with an explicit configuration.
    pub fn with_config(registry: &'r FieldCodecRegistry, config: DecoderConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn registry(&self) -> &'r FieldCodecRegistry {
        self.registry
    }

    /// Decode a JSON value tree against a descriptor.
    ///
    /// Decoding is all-or-nothing: on error no partial value is returned.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` when the node shape disagrees with the descriptor
    /// - `MissingField` when a required record key is absent
    /// - `NumericOverflow` when a number does not fit the declared width
    /// - `UnknownType` for unregistered records and unbound type parameters
    /// - `Arity` when a record descriptor's arguments do not match its codec
    /// - `DepthExceeded` past [`DecoderConfig::max_depth`]
    /// - `InvalidMapKey`, `UnknownField`, `Construction` as described on
    ///   [`DecodeError`]
    pub fn decode(&self, descriptor: &TypeDescriptor, node: &Value) -> Result<DecodedValue> {
        let mut walk = Walk::new(self);
        let result = walk.decode(descriptor, node);
        if let Err(err) = &result {
            debug!(
                target_type = %descriptor,
                kind = err.kind(),
                error = %err,
                "decode failed"
            );
        }
        result
    }

    /// Parse JSON text, then decode it.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Parse` if the text is not valid JSON, otherwise
    /// the errors of [`decode`](Self::decode).
    pub fn decode_str(&self, descriptor: &TypeDescriptor, json: &str) -> Result<DecodedValue> {
        let value: Value = serde_json::from_str(json)?;
        self.decode(descriptor, &value)
    }

    /// Parse JSON bytes, then decode them.
    pub fn decode_slice(&self, descriptor: &TypeDescriptor, data: &[u8]) -> Result<DecodedValue> {
        let value: Value = serde_json::from_slice(data)?;
        self.decode(descriptor, &value)
    }

    /// Decode straight into a Rust type, using its descriptor.
    pub fn decode_as<T: FromDecoded>(&self, node: &Value) -> Result<T> {
        let decoded = self.decode(&T::descriptor(), node)?;
        T::from_decoded(decoded)
    }

    /// Decode independent documents in parallel.
    ///
    /// Results are returned in input order, one per document.
    pub fn decode_batch(
        &self,
        descriptor: &TypeDescriptor,
        nodes: &[Value],
    ) -> Vec<Result<DecodedValue>> {
        nodes
            .par_iter()
            .map(|node| self.decode(descriptor, node))
            .collect()
    }
}

impl JsonDecoder<'static> {
    /// Decoder over the process-wide registry.
    pub fn global() -> Self {
        Self::new(global_registry())
    }
}

/// Short name of a JSON node kind, used in mismatch errors.
pub(crate) fn json_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// State of one decode call: the JSON path and the descriptor chain.
struct Walk<'a, 'r> {
    decoder: &'a JsonDecoder<'r>,
    segments: Vec<Segment>,
    types: Vec<TypeDescriptor>,
}

impl<'a, 'r> Walk<'a, 'r> {
    fn new(decoder: &'a JsonDecoder<'r>) -> Self {
        Self {
            decoder,
            segments: Vec::new(),
            types: Vec::new(),
        }
    }

    fn location(&self) -> Location {
        Location::new(&self.segments, self.types.iter().map(|t| t.to_string()))
    }

    fn mismatch(&self, expected: &TypeDescriptor, node: &Value) -> DecodeError {
        DecodeError::type_mismatch(expected.to_string(), json_kind(node), self.location())
    }

    fn decode(&mut self, ty: &TypeDescriptor, node: &Value) -> Result<DecodedValue> {
        self.types.push(ty.clone());
        if self.types.len() > self.decoder.config.max_depth {
            return Err(DecodeError::DepthExceeded {
                max_depth: self.decoder.config.max_depth,
                location: self.location(),
            });
        }
        let result = self.dispatch(ty, node);
        self.types.pop();
        result
    }

    /// Decode a child node one path segment below the current one.
    fn child(&mut self, segment: Segment, ty: &TypeDescriptor, node: &Value) -> Result<DecodedValue> {
        self.segments.push(segment);
        let result = self.decode(ty, node);
        self.segments.pop();
        result
    }

    fn dispatch(&mut self, ty: &TypeDescriptor, node: &Value) -> Result<DecodedValue> {
        if let BaseIdentity::Param(name) = ty.base() {
            return Err(DecodeError::UnknownType {
                identity: name.clone(),
                location: self.location(),
            });
        }
        if node.is_null() {
            return self.null(ty, node);
        }

        match ty.base() {
            BaseIdentity::Any => Ok(DecodedValue::Raw(node.clone())),
            BaseIdentity::Nullable => {
                let inner = self.type_arg(ty, 0)?;
                self.decode(inner, node)
            }
            BaseIdentity::Bool => node
                .as_bool()
                .map(DecodedValue::Bool)
                .ok_or_else(|| self.mismatch(ty, node)),
            BaseIdentity::String => node
                .as_str()
                .map(|s| DecodedValue::String(s.to_string()))
                .ok_or_else(|| self.mismatch(ty, node)),
            base if base.is_integer() => self.integer(ty, node),
            BaseIdentity::Float32 | BaseIdentity::Float64 => self.float(ty, node),
            BaseIdentity::Sequence => self.sequence(ty, node),
            BaseIdentity::Mapping => self.mapping(ty, node),
            BaseIdentity::Record(name) => self.record(ty, name, node),
            _ => Err(DecodeError::UnknownType {
                identity: ty.base().name().to_string(),
                location: self.location(),
            }),
        }
    }

    fn type_arg<'t>(&self, ty: &'t TypeDescriptor, index: usize) -> Result<&'t TypeDescriptor> {
        ty.arg(index).ok_or_else(|| {
            DecodeError::arity(
                ty.base().name(),
                ty.base().arity().unwrap_or(index + 1),
                ty.args().len(),
            )
            .located(self.location())
        })
    }

    fn null(&self, ty: &TypeDescriptor, node: &Value) -> Result<DecodedValue> {
        match ty.base() {
            BaseIdentity::Nullable => Ok(DecodedValue::Absent),
            BaseIdentity::Any => Ok(DecodedValue::Raw(Value::Null)),
            base if base.is_primitive() => match self.decoder.config.null_primitives {
                NullPolicy::Reject => Err(self.mismatch(ty, node)),
                NullPolicy::Default => {
                    warn!(
                        pointer = %self.location().pointer,
                        target_type = %ty,
                        "null decoded as primitive default"
                    );
                    Ok(zero_value(base))
                }
            },
            _ => Err(self.mismatch(ty, node)),
        }
    }

    fn integer(&self, ty: &TypeDescriptor, node: &Value) -> Result<DecodedValue> {
        let Some(number) = node.as_number() else {
            return Err(self.mismatch(ty, node));
        };

        let wide: i128 = if let Some(i) = number.as_i64() {
            i128::from(i)
        } else if let Some(u) = number.as_u64() {
            i128::from(u)
        } else {
            // Floating literal: accept only integral values
            let f = number.as_f64().unwrap_or(f64::NAN);
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(DecodeError::type_mismatch(
                    ty.to_string(),
                    "fractional number",
                    self.location(),
                ));
            }
            // Saturating cast; anything past 64 bits fails the width check below
            f as i128
        };

        let overflow = || DecodeError::NumericOverflow {
            target: ty.to_string(),
            value: number.to_string(),
            location: self.location(),
        };

        let value = match ty.base() {
            BaseIdentity::Int8 => i8::try_from(wide).map(DecodedValue::Int8),
            BaseIdentity::Int16 => i16::try_from(wide).map(DecodedValue::Int16),
            BaseIdentity::Int32 => i32::try_from(wide).map(DecodedValue::Int32),
            BaseIdentity::Int64 => i64::try_from(wide).map(DecodedValue::Int64),
            BaseIdentity::UInt8 => u8::try_from(wide).map(DecodedValue::UInt8),
            BaseIdentity::UInt16 => u16::try_from(wide).map(DecodedValue::UInt16),
            BaseIdentity::UInt32 => u32::try_from(wide).map(DecodedValue::UInt32),
            _ => u64::try_from(wide).map(DecodedValue::UInt64),
        };
        value.map_err(|_| overflow())
    }

    fn float(&self, ty: &TypeDescriptor, node: &Value) -> Result<DecodedValue> {
        let Some(f) = node.as_f64() else {
            return Err(self.mismatch(ty, node));
        };
        if matches!(ty.base(), BaseIdentity::Float64) {
            return Ok(DecodedValue::Float64(f));
        }
        if f.abs() > f64::from(f32::MAX) {
            return Err(DecodeError::NumericOverflow {
                target: ty.to_string(),
                value: node.to_string(),
                location: self.location(),
            });
        }
        Ok(DecodedValue::Float32(f as f32))
    }

    fn sequence(&mut self, ty: &TypeDescriptor, node: &Value) -> Result<DecodedValue> {
        let Some(items) = node.as_array() else {
            return Err(self.mismatch(ty, node));
        };
        let element = self.type_arg(ty, 0)?;

        let mut decoded = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            decoded.push(self.child(Segment::Index(i), element, item)?);
        }
        Ok(DecodedValue::Sequence(decoded))
    }

    fn mapping(&mut self, ty: &TypeDescriptor, node: &Value) -> Result<DecodedValue> {
        let Some(object) = node.as_object() else {
            return Err(self.mismatch(ty, node));
        };
        let key_ty = self.type_arg(ty, 0)?;
        let value_ty = self.type_arg(ty, 1)?;

        let mut decoded = DecodedMap::with_capacity(object.len());
        for (key, value) in object {
            self.segments.push(Segment::Key(key.clone()));
            let entry = self
                .map_entry(key_ty, value_ty, key, value)
                .and_then(|(map_key, map_value)| {
                    if decoded.contains_key(&map_key) {
                        Err(DecodeError::InvalidMapKey {
                            key: key.clone(),
                            key_type: key_ty.to_string(),
                            reason: format!("duplicate of an earlier key decoding to {map_key}"),
                            location: self.location(),
                        })
                    } else {
                        Ok((map_key, map_value))
                    }
                });
            self.segments.pop();

            let (map_key, map_value) = entry?;
            decoded.insert(map_key, map_value);
        }
        Ok(DecodedValue::Mapping(decoded))
    }

    fn map_entry(
        &mut self,
        key_ty: &TypeDescriptor,
        value_ty: &TypeDescriptor,
        key: &str,
        value: &Value,
    ) -> Result<(MapKey, DecodedValue)> {
        let map_key = self.map_key(key_ty, key)?;
        let map_value = self.decode(value_ty, value)?;
        Ok((map_key, map_value))
    }

    fn map_key(&self, key_ty: &TypeDescriptor, key: &str) -> Result<MapKey> {
        let invalid = |reason: String| DecodeError::InvalidMapKey {
            key: key.to_string(),
            key_type: key_ty.to_string(),
            reason,
            location: self.location(),
        };

        match key_ty.base() {
            BaseIdentity::String => Ok(MapKey::String(key.to_string())),
            BaseIdentity::Bool => match key {
                "true" => Ok(MapKey::Bool(true)),
                "false" => Ok(MapKey::Bool(false)),
                _ => Err(invalid("expected 'true' or 'false'".to_string())),
            },
            base if base.is_integer() => {
                let wide: i128 = key
                    .parse()
                    .map_err(|_| invalid("not a decimal integer".to_string()))?;
                let out_of_range = |_| invalid(format!("out of range for {key_ty}"));
                match base {
                    BaseIdentity::Int8 => i8::try_from(wide).map(i64::from).map(MapKey::Int),
                    BaseIdentity::Int16 => i16::try_from(wide).map(i64::from).map(MapKey::Int),
                    BaseIdentity::Int32 => i32::try_from(wide).map(i64::from).map(MapKey::Int),
                    BaseIdentity::Int64 => i64::try_from(wide).map(MapKey::Int),
                    BaseIdentity::UInt8 => u8::try_from(wide).map(u64::from).map(MapKey::UInt),
                    BaseIdentity::UInt16 => u16::try_from(wide).map(u64::from).map(MapKey::UInt),
                    BaseIdentity::UInt32 => u32::try_from(wide).map(u64::from).map(MapKey::UInt),
                    _ => u64::try_from(wide).map(MapKey::UInt),
                }
                .map_err(out_of_range)
            }
            _ => Err(invalid(format!("{key_ty} cannot be used as a mapping key"))),
        }
    }

    fn record(&mut self, ty: &TypeDescriptor, name: &str, node: &Value) -> Result<DecodedValue> {
        let Some(object) = node.as_object() else {
            return Err(self.mismatch(ty, node));
        };
        let registry = self.decoder.registry;
        let codec = registry.lookup(name).ok_or_else(|| DecodeError::UnknownType {
            identity: name.to_string(),
            location: self.location(),
        })?;
        let bindings = codec
            .bind(ty.args())
            .map_err(|err| err.located(self.location()))?;

        self.check_unknown_keys(name, object, |key| codec.declares(key))?;

        let mut values = FieldValues::with_capacity(codec.fields().len());
        for field in codec.fields() {
            let value = match object.get(&field.name) {
                // Optional keys are nullable-optional: explicit null reads as absent
                Some(Value::Null) if field.presence == Presence::Optional => DecodedValue::Absent,
                Some(child) => {
                    let field_ty = bound_type(&field.descriptor, &bindings);
                    self.child(Segment::Field(field.name.clone()), &field_ty, child)?
                }
                None if field.presence == Presence::Required => {
                    return Err(DecodeError::MissingField {
                        record: name.to_string(),
                        field: field.name.clone(),
                        location: self.location(),
                    });
                }
                None => DecodedValue::Absent,
            };
            values.insert(field.name.clone(), value);
        }

        codec
            .construct(values)
            .map_err(|message| DecodeError::Construction {
                record: name.to_string(),
                message,
                location: self.location(),
            })
    }

    fn check_unknown_keys(
        &mut self,
        record: &str,
        object: &Map<String, Value>,
        declares: impl Fn(&str) -> bool,
    ) -> Result<()> {
        for key in object.keys().filter(|key| !declares(key)) {
            match self.decoder.config.unknown_fields {
                UnknownFieldPolicy::Ignore => {
                    trace!(record, field = %key, "ignoring undeclared field");
                }
                UnknownFieldPolicy::Reject => {
                    self.segments.push(Segment::Field(key.clone()));
                    let location = self.location();
                    self.segments.pop();
                    return Err(DecodeError::UnknownField {
                        record: record.to_string(),
                        field: key.clone(),
                        location,
                    });
                }
            }
        }
        Ok(())
    }
}

fn bound_type(descriptor: &TypeDescriptor, bindings: &HashMap<String, TypeDescriptor>) -> TypeDescriptor {
    if bindings.is_empty() {
        descriptor.clone()
    } else {
        descriptor.substitute(bindings)
    }
}

fn zero_value(base: &BaseIdentity) -> DecodedValue {
    match base {
        BaseIdentity::Bool => DecodedValue::Bool(false),
        BaseIdentity::Int8 => DecodedValue::Int8(0),
        BaseIdentity::Int16 => DecodedValue::Int16(0),
        BaseIdentity::Int32 => DecodedValue::Int32(0),
        BaseIdentity::Int64 => DecodedValue::Int64(0),
        BaseIdentity::UInt8 => DecodedValue::UInt8(0),
        BaseIdentity::UInt16 => DecodedValue::UInt16(0),
        BaseIdentity::UInt32 => DecodedValue::UInt32(0),
        BaseIdentity::UInt64 => DecodedValue::UInt64(0),
        BaseIdentity::Float32 => DecodedValue::Float32(0.0),
        BaseIdentity::Float64 => DecodedValue::Float64(0.0),
        _ => DecodedValue::String(String::new()),
    }
}
