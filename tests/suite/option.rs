//! Option algebra.

use keel::{Option, err, none, ok, some};

fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace().next().into()
}

#[test]
fn none_short_circuits_the_chain() {
    let length = first_word("   ").map(str::len).filter(|n| *n > 2);
    assert_eq!(length, none());
    assert_eq!(first_word("hello world").map(str::len).filter(|n| *n > 2), some(5));
}

#[test]
fn converts_to_result_with_supplied_error() {
    assert_eq!(first_word("a b").to_result("empty"), ok("a"));
    assert_eq!(first_word("").to_result("empty"), err("empty"));
    assert_eq!(first_word("").to_result_else(|| "computed".to_string()), err("computed".to_string()));
}

#[test]
fn none_is_the_default_and_payload_free() {
    let absent: Option<String> = Option::default();
    assert!(absent.is_none());
    assert_eq!(absent, none());
    assert_eq!(format!("{absent:?}"), "None");
}

#[test]
fn std_interop_round_trips() {
    let std_value: std::option::Option<u8> = some(3).into();
    assert_eq!(std_value, Some(3));
    assert_eq!(Option::from(Some(3)), some(3));
    assert_eq!(some(3).to_nullable(), Some(3));
}
