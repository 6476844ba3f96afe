//! Aggregation over parsed inputs.

use std::cell::Cell;

use keel::combinators::{all, all_settled, any, collect, for_each, partition, zip_or_accumulate};
use keel::{err, ok};

use crate::common::parse_int;

#[test]
fn all_never_observes_inputs_after_first_err() {
    let parsed = Cell::new(0);
    let inputs = ["1", "two", "3", "four"];
    let outcome = all(inputs.iter().map(|text| {
        parsed.set(parsed.get() + 1);
        parse_int(text)
    }));
    assert_eq!(outcome, err("not a number: \"two\"".to_string()));
    assert_eq!(parsed.get(), 2);
}

#[test]
fn settled_and_partition_visit_everything() {
    let visits = Cell::new(0);
    let inputs = ["x", "1", "y", "2"];
    let counted = || {
        inputs.iter().map(|text| {
            visits.set(visits.get() + 1);
            parse_int(text)
        })
    };

    let errors = all_settled(counted()).expect_err("two failures");
    assert_eq!(errors.len(), 2);
    assert_eq!(visits.get(), 4);

    let (values, errors) = partition(counted());
    assert_eq!(values, vec![1, 2]);
    assert_eq!(errors.len(), 2);
    assert_eq!(visits.get(), 8);
}

#[test]
fn accumulated_errors_are_non_empty() {
    let errors = zip_or_accumulate(["a", "1", "b"].map(parse_int)).expect_err("two failures");
    assert_eq!(errors.first(), &"not a number: \"a\"".to_string());
    assert_eq!(errors.len(), 2);
}

#[test]
fn any_takes_the_first_success() {
    assert_eq!(any(["x", "5", "6"].map(parse_int)), ok(5));
    assert_eq!(any(["x", "y"].map(parse_int)).map_err(|e| e.len()), err(2));
}

#[test]
fn for_each_and_collect() {
    assert_eq!(for_each(["1", "2"], parse_int), ok(vec![1, 2]));
    let fields = [("width", parse_int("3")), ("height", parse_int("4"))];
    let dims = collect(fields).expect("both parse");
    assert_eq!(dims["width"] * dims["height"], 12);
}
