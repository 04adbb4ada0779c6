// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON encoder for decoded values.
//!
//! The inverse of the decoder: turns a [`DecodedValue`] tree back into a
//! `serde_json::Value`, so that decoding the output against the same
//! descriptor yields the same value.

use serde_json::{Map, Number, Value};

use crate::core::{DecodeError, DecodedValue, Result};

/// JSON encoder for decoded values.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder {
    skip_absent: bool,
}

impl JsonEncoder {
    /// Create an encoder that writes absent values as `null`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Omit absent record fields instead of writing `null`.
    ///
    /// Mapping entries are always written: dropping one would change the
    /// mapping on the next decode.
    pub fn skip_absent(mut self, skip: bool) -> Self {
        self.skip_absent = skip;
        self
    }

    /// Encode a decoded value as a JSON tree.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Encode` for non-finite floats, which JSON
    /// cannot represent.
    pub fn encode(&self, value: &DecodedValue) -> Result<Value> {
        let json = match value {
            DecodedValue::Absent => Value::Null,
            DecodedValue::Bool(b) => Value::Bool(*b),
            DecodedValue::Int8(v) => Value::from(*v),
            DecodedValue::Int16(v) => Value::from(*v),
            DecodedValue::Int32(v) => Value::from(*v),
            DecodedValue::Int64(v) => Value::from(*v),
            DecodedValue::UInt8(v) => Value::from(*v),
            DecodedValue::UInt16(v) => Value::from(*v),
            DecodedValue::UInt32(v) => Value::from(*v),
            DecodedValue::UInt64(v) => Value::from(*v),
            DecodedValue::Float32(v) => float(f64::from(*v))?,
            DecodedValue::Float64(v) => float(*v)?,
            DecodedValue::String(s) => Value::String(s.clone()),
            DecodedValue::Sequence(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.encode(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            DecodedValue::Mapping(entries) => {
                let mut object = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    object.insert(key.to_string(), self.encode(item)?);
                }
                Value::Object(object)
            }
            DecodedValue::Record(record) => {
                let mut object = Map::with_capacity(record.fields.len());
                for (name, item) in &record.fields {
                    if self.skip_absent && item.is_absent() {
                        continue;
                    }
                    object.insert(name.clone(), self.encode(item)?);
                }
                Value::Object(object)
            }
            DecodedValue::Raw(json) => json.clone(),
        };
        Ok(json)
    }

    /// Encode a decoded value as JSON text.
    pub fn encode_string(&self, value: &DecodedValue, pretty: bool) -> Result<String> {
        let json = self.encode(value)?;
        let text = if pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        text.map_err(|e| DecodeError::encode(e.to_string()))
    }
}

fn float(v: f64) -> Result<Value> {
    Number::from_f64(v)
        .map(Value::Number)
        .ok_or_else(|| DecodeError::encode(format!("{v} is not representable in JSON")))
}
