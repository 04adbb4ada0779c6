// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema document tests.
//!
//! Records declared in TOML must decode exactly like the same records
//! registered by hand.

mod common;

use serde_json::json;
use typecodec::schema::{load_str, parse_document};
use typecodec::{DecodeError, DecoderBuilder, JsonDecoder, TypeDescriptor};

use common::{
    expected_link, link_value, links_registry, read_fixture, MultiResult, Plan, ReferenceLink,
};

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_fixture_schema() {
    let (document, registry) = load_str(&read_fixture("links.toml")).unwrap();

    assert_eq!(
        document.names().collect::<Vec<_>>(),
        vec!["Version", "ReferenceLink", "Plan", "MultiResult"]
    );
    assert_eq!(
        registry.identities().collect::<Vec<_>>(),
        vec!["Version", "ReferenceLink", "Plan", "MultiResult"]
    );
    assert!(document.get("MultiResult").unwrap().is_generic());
    assert_eq!(document.decoder.as_ref().map(|c| c.max_depth), Some(64));

    let link = registry.lookup("ReferenceLink").unwrap();
    assert!(link.field("urlStylised").unwrap().is_required());
    assert!(!link.field("textShort").unwrap().is_required());
    assert_eq!(
        link.field("splashScreenTypeId").unwrap().descriptor,
        TypeDescriptor::int32()
    );
}

#[test]
fn test_loaded_schema_matches_hand_built_registry() {
    let (_, loaded) = load_str(&read_fixture("links.toml")).unwrap();
    let built = links_registry();

    let targets = [
        "ReferenceLink",
        "sequence<ReferenceLink>",
        "mapping<string, ReferenceLink>",
        "mapping<string, sequence<ReferenceLink>>",
    ];
    let input = link_value();
    let inputs = [
        input.clone(),
        json!([input.clone()]),
        json!({ "key": input.clone() }),
        json!({ "key": [input], "other": [] }),
    ];

    for (target, input) in targets.iter().zip(inputs.iter()) {
        let ty: TypeDescriptor = target.parse().unwrap();
        assert_eq!(
            JsonDecoder::new(&loaded).decode(&ty, input).unwrap(),
            JsonDecoder::new(&built).decode(&ty, input).unwrap(),
            "{target}"
        );
    }
}

#[test]
fn test_loaded_schema_typed_decode() {
    let (document, registry) = load_str(&read_fixture("links.toml")).unwrap();
    let config = document.decoder.clone().unwrap_or_default();
    let decoder = DecoderBuilder::from_config(config).build(&registry);

    let link: ReferenceLink = decoder.decode_as(&link_value()).unwrap();
    assert_eq!(link, expected_link());

    let input: serde_json::Value = serde_json::from_str(&read_fixture("plans.json")).unwrap();
    let plans: MultiResult<Plan> = decoder.decode_as(&input).unwrap();
    assert_eq!(plans.result[1].name, "Premium");
}

// ============================================================================
// Invalid Documents
// ============================================================================

#[test]
fn test_unknown_schema_key_rejected() {
    let err = parse_document(
        r#"
[[record]]
name = "Plan"
fields = []
"#,
    )
    .unwrap_err();
    assert!(matches!(err, DecodeError::Parse { ref context, .. } if context == "schema document"));
}

#[test]
fn test_invalid_field_type_reports_field() {
    let err = load_str(
        r#"
[[record]]
name = "Plan"

[[record.field]]
name = "id"
type = "sequence<string"
"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, DecodeError::Parse { ref context, .. } if context == "record 'Plan' field 'id'")
    );
}

#[test]
fn test_container_arity_checked_in_schema() {
    let err = load_str(
        r#"
[[record]]
name = "Plan"

[[record.field]]
name = "tags"
type = "mapping<string>"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("record 'Plan' field 'tags'"));
}

#[test]
fn test_duplicate_record_rejected() {
    let err = load_str(
        r#"
[[record]]
name = "Plan"

[[record]]
name = "Plan"
"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        DecodeError::DuplicateRegistration {
            identity: "Plan".to_string()
        }
    );
}

#[test]
fn test_decoder_table_rejects_unknown_setting() {
    let err = parse_document(
        r#"
[decoder]
max_depht = 3
"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), "parse");
}
