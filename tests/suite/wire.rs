//! JSON wire format.

use serde::{Deserialize, Serialize};
use serde_json::json;

use keel::{JsonError, Option, Result, err, none, ok, some};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: u32,
    items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
enum OrderError {
    OutOfStock { sku: String },
    Suspended,
}

type OrderResult = Result<Order, OrderError>;

#[test]
fn round_trips_structured_payloads() {
    let cases: Vec<OrderResult> = vec![
        ok(Order {
            id: 7,
            items: vec!["anchor".into()],
        }),
        err(OrderError::OutOfStock { sku: "A-1".into() }),
        err(OrderError::Suspended),
    ];
    for original in cases {
        let decoded = OrderResult::from_json(original.to_json().unwrap()).unwrap();
        assert_eq!(decoded, original);
    }
}

#[test]
fn legacy_documents_decode() {
    let legacy = json!({"tag": "Err", "error": {"kind": "Suspended"}});
    assert_eq!(OrderResult::from_json(legacy).unwrap(), err(OrderError::Suspended));

    let legacy_none = json!({"tag": "None"});
    assert_eq!(Option::<u8>::from_json(legacy_none).unwrap(), none());
}

#[test]
fn text_form_is_stable() {
    let text = serde_json::to_string(&ok::<u8, ()>(1)).unwrap();
    insta::assert_snapshot!(text, @r#"{"tag":"Ok","schemaVersion":1,"value":1}"#);

    let text = serde_json::to_string(&some(vec![1, 2])).unwrap();
    insta::assert_snapshot!(text, @r#"{"tag":"Some","schemaVersion":1,"value":[1,2]}"#);
}

#[test]
fn foreign_tags_are_rejected() {
    let error = OrderResult::from_json_str(r#"{"tag":"Pending","value":null}"#).unwrap_err();
    assert!(matches!(error, JsonError::InvalidTag { .. }));
    assert!(error.to_string().contains("Pending"));

    let error = Option::<u8>::from_json_str(r#"{"tag":"Err","error":1}"#).unwrap_err();
    assert!(matches!(error, JsonError::InvalidTag { .. }));
}
