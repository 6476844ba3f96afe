//! Schema-validator bridge.

use serde::Serialize;
use serde_json::json;

use keel::schema::{SchemaOutcome, to_standard_schema};
use keel::{Result, err, ok};

#[derive(Debug, Serialize)]
struct FieldError {
    field: &'static str,
    reason: &'static str,
}

fn username(input: &str) -> Result<String, FieldError> {
    if input.len() >= 3 {
        ok(input.to_lowercase())
    } else {
        err(FieldError {
            field: "username",
            reason: "too short",
        })
    }
}

#[test]
fn adapter_exposes_the_shared_shape() {
    let schema = to_standard_schema("keel", username);
    assert_eq!(schema.version(), 1);
    assert_eq!(schema.vendor(), "keel");

    let valid = schema.validate("Ana");
    assert_eq!(serde_json::to_value(&valid).unwrap(), json!({"value": "ana"}));

    let invalid = schema.validate("A");
    assert!(!invalid.is_valid());
    assert_eq!(
        serde_json::to_value(&invalid).unwrap(),
        json!({"issues": [{"message": r#"{"field":"username","reason":"too short"}"#}]})
    );
}

#[test]
fn outcome_deserializes_from_either_shape() {
    let parsed: SchemaOutcome<u8> = serde_json::from_value(json!({"value": 4})).unwrap();
    assert!(parsed.is_valid());
    let parsed: SchemaOutcome<u8> = serde_json::from_value(json!({"issues": []})).unwrap();
    assert!(!parsed.is_valid());
}
