//! Early return in sync and async bodies.

use std::cell::Cell;
use std::rc::Rc;

use keel::{Bail, Flow, ResultAsync, ResultExt, err, ok, safe_try, safe_try_async};

use crate::common::parse_int;

#[derive(Debug, PartialEq)]
enum ImportError {
    BadNumber(String),
    OutOfRange(i64),
}

impl From<String> for ImportError {
    fn from(message: String) -> Self {
        ImportError::BadNumber(message)
    }
}

fn in_range(n: i64) -> keel::Result<i64, ImportError> {
    if (0..=100).contains(&n) { ok(n) } else { err(ImportError::OutOfRange(n)) }
}

fn import(a: &str, b: &str) -> keel::Result<i64, ImportError> {
    safe_try(|| -> Flow<i64, ImportError> {
        let a = parse_int(a).bail().map_err(Bail::widen::<ImportError>)?;
        let b = parse_int(b).bail().map_err(Bail::widen::<ImportError>)?;
        let total = in_range(a + b).bail()?;
        Ok(ok(total))
    })
}

#[test]
fn sync_runner_widens_step_errors() {
    assert_eq!(import("40", "2"), ok(42));
    assert_eq!(import("x", "2"), err(ImportError::BadNumber("not a number: \"x\"".into())));
    assert_eq!(import("90", "20"), err(ImportError::OutOfRange(110)));
}

struct Connection(Rc<Cell<bool>>);

impl Drop for Connection {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

async fn transfer(closed: Rc<Cell<bool>>, amount: &'static str) -> Flow<i64, String> {
    let _connection = Connection(closed);
    let debit = ResultAsync::from_result(parse_int(amount)).await.bail()?;
    let credit = parse_int("5").to_async().await.bail()?;
    Ok(ok(debit + credit))
}

#[tokio::test]
async fn async_runner_cleans_up_on_early_return() {
    let closed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&closed);
    let outcome = safe_try_async(move || transfer(flag, "ten")).await;
    assert_eq!(outcome, err("not a number: \"ten\"".to_string()));
    assert!(closed.get());

    let closed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&closed);
    let outcome = safe_try(move || transfer(flag, "10")).await;
    assert_eq!(outcome, ok(15));
    assert!(closed.get());
}
