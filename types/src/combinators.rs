//! Aggregation over collections of Results.
//!
//! All functions consume their input lazily and allocate fresh outputs.
//! Short-circuiting functions stop pulling from the iterator at the first
//! decisive element, so later items are never observed.

use std::collections::BTreeMap;

use crate::nonempty::NonEmptyVec;
use crate::result::{Result, Variant, err, ok};

/// Ok of every value in order, or the first Err.
pub fn all<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> Result<Vec<T>, E> {
    let iter = results.into_iter();
    let mut values = Vec::with_capacity(iter.size_hint().0);
    for result in iter {
        match result.into_variant() {
            Variant::Ok(value) => values.push(value),
            Variant::Err(error) => return err(error),
        }
    }
    ok(values)
}

/// Visit every input. Ok of all values if none failed, otherwise Err of
/// every error in order.
pub fn all_settled<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> Result<Vec<T>, Vec<E>> {
    let (values, errors) = partition(results);
    if errors.is_empty() {
        ok(values)
    } else {
        err(errors)
    }
}

/// [`all_settled`] with the error side typed as non-empty.
pub fn zip_or_accumulate<T, E>(
    results: impl IntoIterator<Item = Result<T, E>>,
) -> Result<Vec<T>, NonEmptyVec<E>> {
    let (values, errors) = partition(results);
    match NonEmptyVec::new(errors) {
        Ok(errors) => err(errors),
        Err(_empty) => ok(values),
    }
}

/// First Ok wins; otherwise Err of every error in order.
///
/// An empty input has no Ok and yields `Err([])`.
pub fn any<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> Result<T, Vec<E>> {
    let mut errors = Vec::new();
    for result in results {
        match result.into_variant() {
            Variant::Ok(value) => return ok(value),
            Variant::Err(error) => errors.push(error),
        }
    }
    err(errors)
}

/// Split into Ok payloads and Err payloads, each in input order.
pub fn partition<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> (Vec<T>, Vec<E>) {
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result.into_variant() {
            Variant::Ok(value) => values.push(value),
            Variant::Err(error) => errors.push(error),
        }
    }
    (values, errors)
}

/// Map each item through `f`, stopping before the item after the first Err.
pub fn for_each<I, U, E>(
    items: impl IntoIterator<Item = I>,
    f: impl FnMut(I) -> Result<U, E>,
) -> Result<Vec<U>, E> {
    all(items.into_iter().map(f))
}

/// Like [`all`] over named fields. Fields are visited in the input's
/// enumeration order and the first Err in that order wins. A repeated key
/// keeps its first value.
pub fn collect<K: Ord, T, E>(
    fields: impl IntoIterator<Item = (K, Result<T, E>)>,
) -> Result<BTreeMap<K, T>, E> {
    let mut values = BTreeMap::new();
    for (key, result) in fields {
        match result.into_variant() {
            Variant::Ok(value) => {
                values.entry(key).or_insert(value);
            }
            Variant::Err(error) => return err(error),
        }
    }
    ok(values)
}
