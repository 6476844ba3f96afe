//! Result algebra laws and side-effect semantics.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Mutex, OnceLock};

use keel::report::{self, TeeSite};
use keel::{Result, Tag, UnwrapError, err, ok};

use crate::common::{init_tracing, parse_int};

fn suppressed_log() -> &'static Mutex<Vec<(TeeSite, String)>> {
    static LOG: OnceLock<Mutex<Vec<(TeeSite, String)>>> = OnceLock::new();
    LOG.get_or_init(|| {
        report::set_observer(|event| {
            if let Some(log) = LOG.get()
                && let Ok(mut entries) = log.lock()
            {
                entries.push((event.site(), event.panic().message().to_string()));
            }
        });
        Mutex::new(Vec::new())
    })
}

fn was_reported(site: TeeSite, message: &str) -> bool {
    suppressed_log()
        .lock()
        .map(|entries| entries.iter().any(|(s, m)| *s == site && m == message))
        .unwrap_or(false)
}

#[test]
fn construction_carries_value_unchanged() {
    let r: Result<Vec<u8>, ()> = ok(vec![1, 2]);
    assert_eq!(r.tag(), Tag::Ok);
    assert_eq!(r.as_ref().to_nullable(), Some(&vec![1, 2]));

    let e: Result<(), &str> = err("boom");
    assert_eq!(e.tag(), Tag::Err);
    assert_eq!(e.to_option_err().to_nullable(), Some("boom"));
}

#[test]
fn exactly_one_of_ok_or_err_holds() {
    for r in [parse_int("4"), parse_int("four")] {
        assert!(r.is_ok() != r.is_err());
    }
}

#[test]
fn identity_maps_preserve_the_result() {
    for r in [parse_int("7"), parse_int("x")] {
        assert_eq!(r.clone().map(|v| v), r);
        assert_eq!(r.clone().map_err(|e| e), r);
    }
}

#[test]
fn and_then_composes_fallible_steps() {
    let halve = |n: i64| if n % 2 == 0 { ok(n / 2) } else { err(format!("{n} is odd")) };
    assert_eq!(parse_int("8").and_then(halve).and_then(halve), ok(2));
    assert_eq!(parse_int("6").and_then(halve).and_then(halve), err("3 is odd".to_string()));
    assert_eq!(parse_int("?").and_then(halve), err("not a number: \"?\"".to_string()));
}

#[test]
fn or_else_recovers_only_errors() {
    assert_eq!(parse_int("x").or_else(|_| ok::<_, ()>(0)), ok(0));
    assert_eq!(parse_int("5").or_else(|_| ok::<_, ()>(0)), ok(5));
}

#[test]
fn and_tee_swallows_and_reports_panics() {
    init_tracing();
    let _ = suppressed_log();

    let outcome = parse_int("3").and_tee(|_| panic!("audit sink offline"));
    assert_eq!(outcome, ok(3));
    assert!(was_reported(TeeSite::AndTee, "audit sink offline"));

    let outcome = parse_int("?").or_tee(|_| panic!("alert sink offline"));
    assert!(outcome.is_err());
    assert!(was_reported(TeeSite::OrTee, "alert sink offline"));
}

#[test]
fn inspect_lets_panics_propagate() {
    let unwound = catch_unwind(AssertUnwindSafe(|| parse_int("3").inspect(|_| panic!("inspect failure"))));
    assert!(unwound.is_err());

    let unwound = catch_unwind(AssertUnwindSafe(|| parse_int("?").inspect_err(|_| panic!("inspect failure"))));
    assert!(unwound.is_err());
}

#[test]
fn expect_raises_typed_violation() {
    init_tracing();
    let payload = catch_unwind(|| parse_int("nope").expect("need a number")).unwrap_err();
    let violation = UnwrapError::from_panic(payload.as_ref()).expect("typed payload");
    assert_eq!(violation.tag(), Tag::Err);
    assert_eq!(violation.message(), "need a number");
    assert!(violation.payload().contains("not a number"));

    let payload = catch_unwind(|| parse_int("1").expect_err("wanted a failure")).unwrap_err();
    let violation = UnwrapError::from_panic(payload.as_ref()).expect("typed payload");
    assert_eq!(violation.tag(), Tag::Ok);
    assert_eq!(violation.payload(), "1");
}

#[test]
fn try_catch_turns_panics_into_errors() {
    let caught: Result<i32, String> = keel::try_catch(|| panic!("parser exploded"), |p| p.into_message());
    assert_eq!(caught, err("parser exploded".to_string()));
}

#[test]
fn conversions_between_families() {
    assert_eq!(parse_int("2").to_option(), keel::some(2));
    assert_eq!(parse_int("x").to_option(), keel::none());
    assert_eq!(parse_int("2").into_tuple(), (None, Some(2)));
    assert_eq!(ok::<i32, i32>(1).flip(), err(1));
    assert_eq!(ok::<Result<i32, &str>, &str>(ok(1)).flatten(), ok(1));
}
