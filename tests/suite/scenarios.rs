//! Reference scenarios for the aggregation, early-return and Do-notation
//! surfaces.

use keel::combinators::{all, all_settled, partition};
use keel::{Flow, Result, begin, err, ok, safe_try};

type R = Result<i32, &'static str>;

fn rs<const N: usize>(items: [R; N]) -> [R; N] {
    items
}

#[test]
fn all_of_successes() {
    assert_eq!(all(rs([ok(1), ok(2), ok(3)])), ok(vec![1, 2, 3]));
}

#[test]
fn all_stops_at_failure() {
    assert_eq!(all(rs([ok(1), err("x"), ok(3)])), err("x"));
}

#[test]
fn all_settled_gathers_failures() {
    assert_eq!(all_settled(rs([ok(1), err("a"), err("b")])), err(vec!["a", "b"]));
}

#[test]
fn runner_sums_or_stops() {
    let summed = safe_try(|| -> Flow<i32, &str> {
        let a = ok::<i32, &str>(1).bail()?;
        let b = ok::<i32, &str>(2).bail()?;
        Ok(ok(a + b))
    });
    assert_eq!(summed, ok(3));

    let mut unreached = false;
    let stopped = safe_try(|| -> Flow<i32, &str> {
        let x = ok::<i32, &str>(1).bail()?;
        let _ = err::<i32, &str>("stop").bail()?;
        unreached = true;
        Ok(ok(x))
    });
    assert_eq!(stopped, err("stop"));
    assert!(!unreached);
}

#[test]
fn bind_builds_named_context() {
    let ctx = begin::<&str>()
        .bind("x", |_| ok(1_i32))
        .bind("y", |ctx| ok(ctx.get::<i32>("x").copied().unwrap_or_default() + 1))
        .expect("both steps succeed");
    assert_eq!(ctx.names().collect::<Vec<_>>(), ["x", "y"]);
    assert_eq!(ctx.get::<i32>("x"), Some(&1));
    assert_eq!(ctx.get::<i32>("y"), Some(&2));
}

#[test]
fn partition_splits_values_and_errors() {
    assert_eq!(
        partition(rs([ok(1), err("a"), ok(3), err("b")])),
        (vec![1, 3], vec!["a", "b"])
    );
}
