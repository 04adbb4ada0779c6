// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed materialization.
//!
//! [`Described`] gives the descriptor of a Rust type, generic arguments
//! included, so `Vec<ReferenceLink>` describes itself as
//! `sequence<ReferenceLink>`. [`FromDecoded`] converts a decoded value tree
//! back into that Rust type.
//!
//! This is also where the naive resolution path shows its limits: a value
//! left as untyped JSON cannot become a typed Rust value, and the conversion
//! fails with `GenericInformationLost`.
//!
//! User records implement both traits by hand:
//!
//! ```
//! use typecodec::encoding::typed::{into_record, take_field, Described, FromDecoded};
//! use typecodec::{DecodedValue, Result, TypeDescriptor};
//!
//! struct Version {
//!     major: i32,
//!     minor: i32,
//! }
//!
//! impl Described for Version {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::record("Version")
//!     }
//! }
//!
//! impl FromDecoded for Version {
//!     fn from_decoded(value: DecodedValue) -> Result<Self> {
//!         let mut record = into_record::<Self>(value)?;
//!         Ok(Version {
//!             major: take_field(&mut record, "major")?,
//!             minor: take_field(&mut record, "minor")?,
//!         })
//!     }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use indexmap::IndexMap;

use super::json::encoder::JsonEncoder;
use crate::core::{DecodeError, DecodedValue, Location, MapKey, Record, Result, TypeDescriptor};

/// Rust types with a known descriptor.
pub trait Described {
    /// Descriptor of this type, nested generic arguments included.
    fn descriptor() -> TypeDescriptor;
}

/// Rust types that can be built from a decoded value.
pub trait FromDecoded: Described + Sized {
    fn from_decoded(value: DecodedValue) -> Result<Self>;
}

/// Rust types usable as mapping keys.
pub trait FromMapKey: Described + Sized {
    fn from_map_key(key: MapKey) -> Result<Self>;
}

/// Error for a value that does not have the shape `T` needs.
///
/// Untyped JSON is reported as `GenericInformationLost`: the decoder never
/// knew which type to give it.
pub fn unexpected<T: Described>(value: &DecodedValue) -> DecodeError {
    let target = T::descriptor().to_string();
    if value.is_raw() {
        DecodeError::GenericInformationLost {
            location: Location::of_type(target.clone()),
            target,
        }
    } else {
        DecodeError::type_mismatch(target.clone(), value.kind(), Location::of_type(target))
    }
}

/// Unwrap a decoded record, checking its identity against `T`'s descriptor.
pub fn into_record<T: Described>(value: DecodedValue) -> Result<Record> {
    let descriptor = T::descriptor();
    match value {
        DecodedValue::Record(record)
            if descriptor.record_name() == Some(record.identity.as_str()) =>
        {
            Ok(record)
        }
        DecodedValue::Record(record) => Err(DecodeError::type_mismatch(
            descriptor.to_string(),
            record.identity,
            Location::of_type(descriptor.to_string()),
        )),
        other => Err(unexpected::<T>(&other)),
    }
}

/// Take a field out of a record and convert it.
///
/// A field the record does not carry converts from `Absent`, so optional
/// fields map naturally onto `Option<T>`.
pub fn take_field<T: FromDecoded>(record: &mut Record, field: &str) -> Result<T> {
    T::from_decoded(record.take(field).unwrap_or(DecodedValue::Absent))
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident, $ctor:ident);* $(;)?) => {
        $(
            impl Described for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::$ctor()
                }
            }

            impl FromDecoded for $ty {
                fn from_decoded(value: DecodedValue) -> Result<Self> {
                    match value {
                        DecodedValue::$variant(v) => Ok(v),
                        other => Err(unexpected::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool, bool;
    i8 => Int8, int8;
    i16 => Int16, int16;
    i32 => Int32, int32;
    i64 => Int64, int64;
    u8 => UInt8, uint8;
    u16 => UInt16, uint16;
    u32 => UInt32, uint32;
    u64 => UInt64, uint64;
    f32 => Float32, float32;
    f64 => Float64, float64;
    String => String, string;
}

macro_rules! impl_int_key {
    ($($ty:ty => $variant:ident);* $(;)?) => {
        $(
            impl FromMapKey for $ty {
                fn from_map_key(key: MapKey) -> Result<Self> {
                    let converted = match &key {
                        MapKey::$variant(v) => <$ty>::try_from(*v).ok(),
                        _ => None,
                    };
                    converted.ok_or_else(|| invalid_key::<Self>(&key))
                }
            }
        )*
    };
}

impl_int_key! {
    i8 => Int;
    i16 => Int;
    i32 => Int;
    i64 => Int;
    u8 => UInt;
    u16 => UInt;
    u32 => UInt;
    u64 => UInt;
}

impl FromMapKey for String {
    fn from_map_key(key: MapKey) -> Result<Self> {
        match key {
            MapKey::String(s) => Ok(s),
            other => Err(invalid_key::<Self>(&other)),
        }
    }
}

impl FromMapKey for bool {
    fn from_map_key(key: MapKey) -> Result<Self> {
        match key {
            MapKey::Bool(b) => Ok(b),
            other => Err(invalid_key::<Self>(&other)),
        }
    }
}

fn invalid_key<T: Described>(key: &MapKey) -> DecodeError {
    let key_type = T::descriptor().to_string();
    DecodeError::InvalidMapKey {
        key: key.to_string(),
        reason: "decoded key has a different type".to_string(),
        location: Location::of_type(key_type.clone()),
        key_type,
    }
}

impl<T: Described> Described for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::nullable(T::descriptor())
    }
}

impl<T: FromDecoded> FromDecoded for Option<T> {
    fn from_decoded(value: DecodedValue) -> Result<Self> {
        match value {
            DecodedValue::Absent | DecodedValue::Raw(serde_json::Value::Null) => Ok(None),
            other => T::from_decoded(other).map(Some),
        }
    }
}

impl<T: Described> Described for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::descriptor())
    }
}

impl<T: FromDecoded> FromDecoded for Vec<T> {
    fn from_decoded(value: DecodedValue) -> Result<Self> {
        match value {
            DecodedValue::Sequence(items) => items.into_iter().map(T::from_decoded).collect(),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

macro_rules! impl_map {
    ($($map:ident: $bound:path);* $(;)?) => {
        $(
            impl<K: Described, V: Described> Described for $map<K, V> {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::mapping_of(K::descriptor(), V::descriptor())
                }
            }

            impl<K, V> FromDecoded for $map<K, V>
            where
                K: FromMapKey + $bound,
                V: FromDecoded,
            {
                fn from_decoded(value: DecodedValue) -> Result<Self> {
                    match value {
                        DecodedValue::Mapping(entries) => entries
                            .into_iter()
                            .map(|(k, v)| -> Result<(K, V)> {
                                Ok((K::from_map_key(k)?, V::from_decoded(v)?))
                            })
                            .collect(),
                        other => Err(unexpected::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

impl_map! {
    IndexMap: HashKey;
    HashMap: HashKey;
    BTreeMap: Ord;
}

/// Key bound for hashed maps.
pub trait HashKey: Eq + Hash {}

impl<T: Eq + Hash> HashKey for T {}

impl Described for serde_json::Value {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::any()
    }
}

impl FromDecoded for serde_json::Value {
    /// Untyped JSON passes through; typed values are re-encoded.
    fn from_decoded(value: DecodedValue) -> Result<Self> {
        match value {
            DecodedValue::Raw(json) => Ok(json),
            other => JsonEncoder::new().encode(&other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValues;

    #[derive(Debug, PartialEq)]
    struct Version {
        major: i32,
        minor: i32,
    }

    impl Described for Version {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::record("Version")
        }
    }

    impl FromDecoded for Version {
        fn from_decoded(value: DecodedValue) -> Result<Self> {
            let mut record = into_record::<Self>(value)?;
            Ok(Version {
                major: take_field(&mut record, "major")?,
                minor: take_field(&mut record, "minor")?,
            })
        }
    }

    fn version_value(major: i32, minor: i32) -> DecodedValue {
        let mut fields = FieldValues::new();
        fields.insert("major".to_string(), DecodedValue::Int32(major));
        fields.insert("minor".to_string(), DecodedValue::Int32(minor));
        DecodedValue::Record(Record::new("Version", fields))
    }

    #[test]
    fn test_nested_descriptors() {
        assert_eq!(
            IndexMap::<String, Vec<Version>>::descriptor().to_string(),
            "mapping<string, sequence<Version>>"
        );
        assert_eq!(Option::<i64>::descriptor().to_string(), "nullable<int64>");
        assert_eq!(
            Vec::<HashMap<u8, Option<String>>>::descriptor().to_string(),
            "sequence<mapping<uint8, nullable<string>>>"
        );
    }

    #[test]
    fn test_record_from_decoded() {
        let version = Version::from_decoded(version_value(1, 0)).unwrap();
        assert_eq!(version, Version { major: 1, minor: 0 });
    }

    #[test]
    fn test_wrong_record_identity() {
        let value = DecodedValue::Record(Record::new("Plan", FieldValues::new()));
        let err = Version::from_decoded(value).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { ref found, .. } if found == "Plan"));
    }

    #[test]
    fn test_raw_value_loses_generic_information() {
        let raw = DecodedValue::Raw(serde_json::json!({"major": 1, "minor": 0}));
        let err = Version::from_decoded(raw).unwrap_err();
        assert_eq!(err.kind(), "generic_information_lost");

        let seq = DecodedValue::Sequence(vec![DecodedValue::Raw(serde_json::json!({}))]);
        let err = Vec::<Version>::from_decoded(seq).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::GenericInformationLost { ref target, .. } if target == "Version"
        ));
    }

    #[test]
    fn test_option_from_absent() {
        assert_eq!(Option::<String>::from_decoded(DecodedValue::Absent).unwrap(), None);
        assert_eq!(
            Option::<String>::from_decoded(DecodedValue::from("x")).unwrap(),
            Some("x".to_string())
        );
    }

    #[test]
    fn test_map_from_decoded() {
        let mut entries = crate::core::DecodedMap::new();
        entries.insert(MapKey::Int(2), version_value(2, 0));
        entries.insert(MapKey::Int(1), version_value(1, 5));

        let ordered = IndexMap::<i32, Version>::from_decoded(DecodedValue::Mapping(entries.clone()))
            .unwrap();
        assert_eq!(ordered.keys().copied().collect::<Vec<_>>(), vec![2, 1]);

        let sorted = BTreeMap::<i64, Version>::from_decoded(DecodedValue::Mapping(entries)).unwrap();
        assert_eq!(sorted.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_map_key_type_mismatch() {
        let mut entries = crate::core::DecodedMap::new();
        entries.insert(MapKey::from("a"), DecodedValue::Bool(true));
        let err = HashMap::<u8, bool>::from_decoded(DecodedValue::Mapping(entries)).unwrap_err();
        assert_eq!(err.kind(), "invalid_map_key");
    }

    #[test]
    fn test_primitive_width_is_exact() {
        assert_eq!(i32::from_decoded(DecodedValue::Int32(7)).unwrap(), 7);
        let err = i32::from_decoded(DecodedValue::Int64(7)).unwrap_err();
        assert_eq!(err.kind(), "type_mismatch");
    }

    #[test]
    fn test_json_value_passthrough() {
        let raw = serde_json::json!({"k": [1, 2]});
        assert_eq!(
            serde_json::Value::from_decoded(DecodedValue::Raw(raw.clone())).unwrap(),
            raw
        );
        assert_eq!(
            serde_json::Value::from_decoded(DecodedValue::Int32(4)).unwrap(),
            serde_json::json!(4)
        );
    }
}
