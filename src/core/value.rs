// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded value type system.
//!
//! Provides the value tree produced by descriptor-driven decoding. Unlike the
//! JSON input, every node here already carries the type the descriptor asked
//! for: integers have their declared width, mappings carry typed keys and
//! records carry their identity.

use std::fmt;

use indexmap::IndexMap;

/// Field name -> decoded value, in declaration order.
pub type FieldValues = IndexMap<String, DecodedValue>;

/// Decoded mapping, in input key order.
pub type DecodedMap = IndexMap<MapKey, DecodedValue>;

/// Typed mapping key.
///
/// JSON keys are always strings on the wire; the key descriptor of a mapping
/// decides which variant they are parsed into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    String(String),
    Int(i64),
    UInt(u64),
    Bool(bool),
}

impl MapKey {
    /// Get the key as a string slice, if it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MapKey::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::String(s) => write!(f, "{s}"),
            MapKey::Int(i) => write!(f, "{i}"),
            MapKey::UInt(u) => write!(f, "{u}"),
            MapKey::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::String(s.to_string())
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::String(s)
    }
}

/// A decoded record instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Record identity (e.g. "ReferenceLink")
    pub identity: String,
    /// Field values in declaration order
    pub fields: FieldValues,
}

impl Record {
    /// Create a record from its identity and decoded fields.
    pub fn new(identity: impl Into<String>, fields: FieldValues) -> Self {
        Self {
            identity: identity.into(),
            fields,
        }
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&DecodedValue> {
        self.fields.get(field)
    }

    /// Remove and return a field value, leaving the rest in place.
    pub fn take(&mut self, field: &str) -> Option<DecodedValue> {
        self.fields.shift_remove(field)
    }
}

/// Unified value type for decoded JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    // Nullable value that was null or whose key was missing
    Absent,

    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Ordered sequence
    Sequence(Vec<DecodedValue>),

    // Ordered mapping with typed keys
    Mapping(DecodedMap),

    // Record built by a field codec
    Record(Record),

    // Untyped JSON, either requested (`any`) or left behind by naive resolution
    Raw(serde_json::Value),
}

impl DecodedValue {
    // ========================================================================
    // Type Checking Predicates
    // ========================================================================

    pub fn is_absent(&self) -> bool {
        matches!(self, DecodedValue::Absent)
    }

    /// Check if this value is untyped JSON.
    pub fn is_raw(&self) -> bool {
        matches!(self, DecodedValue::Raw(_))
    }

    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DecodedValue::Int8(_)
                | DecodedValue::Int16(_)
                | DecodedValue::Int32(_)
                | DecodedValue::Int64(_)
                | DecodedValue::UInt8(_)
                | DecodedValue::UInt16(_)
                | DecodedValue::UInt32(_)
                | DecodedValue::UInt64(_)
        )
    }

    /// Check if this value is a container (sequence, mapping or record).
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            DecodedValue::Sequence(_) | DecodedValue::Mapping(_) | DecodedValue::Record(_)
        )
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodedValue::Absent => "absent",
            DecodedValue::Bool(_) => "bool",
            DecodedValue::Int8(_) => "int8",
            DecodedValue::Int16(_) => "int16",
            DecodedValue::Int32(_) => "int32",
            DecodedValue::Int64(_) => "int64",
            DecodedValue::UInt8(_) => "uint8",
            DecodedValue::UInt16(_) => "uint16",
            DecodedValue::UInt32(_) => "uint32",
            DecodedValue::UInt64(_) => "uint64",
            DecodedValue::Float32(_) => "float32",
            DecodedValue::Float64(_) => "float64",
            DecodedValue::String(_) => "string",
            DecodedValue::Sequence(_) => "sequence",
            DecodedValue::Mapping(_) => "mapping",
            DecodedValue::Record(_) => "record",
            DecodedValue::Raw(_) => "untyped json",
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DecodedValue::Int8(v) => Some(*v as i64),
            DecodedValue::Int16(v) => Some(*v as i64),
            DecodedValue::Int32(v) => Some(*v as i64),
            DecodedValue::Int64(v) => Some(*v),
            DecodedValue::UInt8(v) => Some(*v as i64),
            DecodedValue::UInt16(v) => Some(*v as i64),
            DecodedValue::UInt32(v) => Some(*v as i64),
            DecodedValue::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to convert this value to u64 (for non-negative integers only).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            DecodedValue::UInt64(v) => Some(*v),
            other => other.as_i64().and_then(|v| u64::try_from(v).ok()),
        }
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DecodedValue::Float32(v) => Some(*v as f64),
            DecodedValue::Float64(v) => Some(*v),
            DecodedValue::UInt64(v) => Some(*v as f64),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_sequence(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&DecodedMap> {
        match self {
            DecodedValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            DecodedValue::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Element of a sequence.
    pub fn index(&self, index: usize) -> Option<&DecodedValue> {
        self.as_sequence().and_then(|items| items.get(index))
    }

    /// Value under a string key of a mapping, or a field of a record.
    pub fn get(&self, key: &str) -> Option<&DecodedValue> {
        match self {
            DecodedValue::Mapping(map) => map.get(&MapKey::String(key.to_string())),
            DecodedValue::Record(record) => record.get(key),
            _ => None,
        }
    }

    /// Value under a typed mapping key.
    pub fn get_key(&self, key: &MapKey) -> Option<&DecodedValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Number of elements, entries or fields for containers.
    pub fn len(&self) -> Option<usize> {
        match self {
            DecodedValue::Sequence(items) => Some(items.len()),
            DecodedValue::Mapping(map) => Some(map.len()),
            DecodedValue::Record(record) => Some(record.fields.len()),
            _ => None,
        }
    }
}

impl From<Record> for DecodedValue {
    fn from(record: Record) -> Self {
        DecodedValue::Record(record)
    }
}

impl From<&str> for DecodedValue {
    fn from(s: &str) -> Self {
        DecodedValue::String(s.to_string())
    }
}

impl From<String> for DecodedValue {
    fn from(s: String) -> Self {
        DecodedValue::String(s)
    }
}
