// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use typecodec::encoding::typed::{into_record, take_field};
use typecodec::{
    DecodedValue, Described, FieldCodec, FieldCodecRegistry, FromDecoded, Result,
    TypeDescriptor,
};

// ============================================================================
// Test Records
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    pub major: i32,
    pub minor: i32,
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

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLink {
    pub url_stylised: String,
    pub url_unstylised: String,
    pub text_long: Option<String>,
    pub text_short: Option<String>,
    pub splash_screen_type_id: i32,
    pub version: Option<Version>,
}

impl Described for ReferenceLink {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::record("ReferenceLink")
    }
}

impl FromDecoded for ReferenceLink {
    fn from_decoded(value: DecodedValue) -> Result<Self> {
        let mut record = into_record::<Self>(value)?;
        Ok(ReferenceLink {
            url_stylised: take_field(&mut record, "urlStylised")?,
            url_unstylised: take_field(&mut record, "urlUnstylised")?,
            text_long: take_field(&mut record, "textLong")?,
            text_short: take_field(&mut record, "textShort")?,
            splash_screen_type_id: take_field(&mut record, "splashScreenTypeId")?,
            version: take_field(&mut record, "version")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: String,
    pub name: String,
}

impl Described for Plan {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::record("Plan")
    }
}

impl FromDecoded for Plan {
    fn from_decoded(value: DecodedValue) -> Result<Self> {
        let mut record = into_record::<Self>(value)?;
        Ok(Plan {
            id: take_field(&mut record, "id")?,
            name: take_field(&mut record, "name")?,
        })
    }
}

/// Generic envelope: `{"result": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiResult<T> {
    pub result: Vec<T>,
}

impl<T: Described> Described for MultiResult<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::record_with("MultiResult", vec![T::descriptor()])
    }
}

impl<T: FromDecoded> FromDecoded for MultiResult<T> {
    fn from_decoded(value: DecodedValue) -> Result<Self> {
        let mut record = into_record::<Self>(value)?;
        Ok(MultiResult {
            result: take_field(&mut record, "result")?,
        })
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Field codecs for the test records, registered by hand.
pub fn links_registry() -> FieldCodecRegistry {
    let mut registry = FieldCodecRegistry::new();
    registry
        .register_all(vec![
            FieldCodec::builder("Version")
                .field("major", TypeDescriptor::int32())
                .field("minor", TypeDescriptor::int32())
                .build()
                .unwrap(),
            FieldCodec::builder("ReferenceLink")
                .field("urlStylised", TypeDescriptor::string())
                .field("urlUnstylised", TypeDescriptor::string())
                .nullable_field("textLong", TypeDescriptor::string())
                .nullable_field("textShort", TypeDescriptor::string())
                .field("splashScreenTypeId", TypeDescriptor::int32())
                .nullable_field("version", TypeDescriptor::record("Version"))
                .build()
                .unwrap(),
            FieldCodec::builder("Plan")
                .field("id", TypeDescriptor::string())
                .field("name", TypeDescriptor::string())
                .build()
                .unwrap(),
            FieldCodec::builder("MultiResult")
                .type_param("T")
                .field(
                    "result",
                    TypeDescriptor::sequence_of(TypeDescriptor::param("T")),
                )
                .build()
                .unwrap(),
        ])
        .unwrap();
    registry
}

// ============================================================================
// Fixtures
// ============================================================================

pub const LINK_JSON: &str = r#"{"urlStylised":"urlStylised","urlUnstylised":"urlUnstylised","textLong":"textLong","textShort":"textShort","splashScreenTypeId":1,"version":{"major":1,"minor":0}}"#;

pub fn expected_link() -> ReferenceLink {
    ReferenceLink {
        url_stylised: "urlStylised".to_string(),
        url_unstylised: "urlUnstylised".to_string(),
        text_long: Some("textLong".to_string()),
        text_short: Some("textShort".to_string()),
        splash_screen_type_id: 1,
        version: Some(Version { major: 1, minor: 0 }),
    }
}

pub fn link_value() -> serde_json::Value {
    serde_json::from_str(LINK_JSON).unwrap()
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {name}: {e}"))
}
