//! ResultAsync against foreign futures and callback APIs.

use std::cell::RefCell;
use std::rc::Rc;

use keel::{NonEmptyVec, Rejection, ResultAsync, ResultExt, err, ok};

use crate::common::{init_tracing, parse_int};

#[derive(Debug, PartialEq)]
enum FetchError {
    Refused(String),
    Crashed(String),
    Dropped,
}

fn classify(rejection: Rejection<String>) -> FetchError {
    match rejection {
        Rejection::Failed(reason) => FetchError::Refused(reason),
        Rejection::Panicked(panic) => FetchError::Crashed(panic.into_message()),
        Rejection::Abandoned => FetchError::Dropped,
    }
}

async fn flaky(succeed: bool) -> std::result::Result<u32, String> {
    if succeed { Ok(200) } else { Err("503".to_string()) }
}

#[tokio::test]
async fn foreign_failures_never_escape() {
    init_tracing();
    let good = ResultAsync::from_promise(flaky(true), classify);
    assert_eq!(good.await, ok(200));

    let refused = ResultAsync::from_promise(flaky(false), classify);
    assert_eq!(refused.await, err(FetchError::Refused("503".into())));

    let crashed = ResultAsync::<u32, _>::from_promise(
        async {
            let body: std::result::Result<u32, String> = Err("unused".into());
            if body.is_err() {
                panic!("connection reset");
            }
            body
        },
        classify,
    );
    assert_eq!(crashed.await, err(FetchError::Crashed("connection reset".into())));
}

#[tokio::test]
async fn callback_api_bridges() {
    let pending: Rc<RefCell<Vec<keel::Callback<u32, String>>>> = Rc::default();
    let registry = Rc::clone(&pending);
    let reply = ResultAsync::from_callback(move |callback| registry.borrow_mut().push(callback), classify);

    let callback = pending.borrow_mut().pop().expect("registered synchronously");
    callback.reject("timeout".into());
    assert_eq!(reply.await, err(FetchError::Refused("timeout".into())));

    let dropped = ResultAsync::<u32, _>::from_callback(|_callback| {}, classify);
    assert_eq!(dropped.await, err(FetchError::Dropped));
}

#[tokio::test]
async fn chain_runs_in_declaration_order() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let (a, b, c) = (Rc::clone(&order), Rc::clone(&order), Rc::clone(&order));
    let outcome = parse_int("20")
        .to_async()
        .inspect(move |_| a.borrow_mut().push("inspect"))
        .async_map(move |n| async move {
            b.borrow_mut().push("async_map");
            n + 1
        })
        .and_tee(move |_| c.borrow_mut().push("and_tee"))
        .await;
    assert_eq!(outcome, ok(21));
    assert_eq!(*order.borrow(), ["inspect", "async_map", "and_tee"]);
}

#[tokio::test]
async fn race_and_sequential_all() {
    let slow = ResultAsync::<i64, String>::new(std::future::pending());
    let fast = parse_int("9").to_async();
    assert_eq!(ResultAsync::race(NonEmptyVec::from_parts(slow, [fast])).await, ok(9));

    let both = ResultAsync::all([parse_int("1").to_async(), parse_int("2").to_async()]);
    assert_eq!(both.await, ok(vec![1, 2]));
}

#[tokio::test]
async fn async_and_then_accepts_either_result_kind() {
    let doubled = parse_int("4")
        .async_and_then(|n| ResultAsync::ok(n * 2))
        .and_then(|n| if n > 5 { ok(n) } else { err("too small".to_string()) })
        .await;
    assert_eq!(doubled, ok(8));
}

#[tokio::test]
async fn async_tee_panic_leaves_result_untouched() {
    init_tracing();
    let outcome = parse_int("?")
        .to_async()
        .async_or_tee(|_| async { panic!("alert sink offline") })
        .await;
    assert!(outcome.is_err());
}
