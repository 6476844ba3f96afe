//! Non-empty vectors.
//!
//! Used wherever "at least one" is part of the contract: the error side of
//! `zip_or_accumulate` and the inputs of `ResultAsync::race`.

use std::ops::Deref;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A `Vec` guaranteed to hold at least one element.
///
/// # Invariants
///
/// - `len() >= 1` for the whole lifetime of the value
///
/// # Serde
///
/// Serializes as a plain JSON array. Deserialization rejects `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyVec<T>(Vec<T>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("collection must not be empty")]
pub struct EmptyVecError;

impl<T> NonEmptyVec<T> {
    pub fn new(items: Vec<T>) -> Result<Self, EmptyVecError> {
        if items.is_empty() {
            Err(EmptyVecError)
        } else {
            Ok(Self(items))
        }
    }

    #[must_use]
    pub fn singleton(item: T) -> Self {
        Self(vec![item])
    }

    /// Build from a head element and the rest.
    #[must_use]
    pub fn from_parts(head: T, tail: impl IntoIterator<Item = T>) -> Self {
        let mut items = vec![head];
        items.extend(tail);
        Self(items)
    }

    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    #[must_use]
    pub fn first(&self) -> &T {
        &self.0[0]
    }

    #[must_use]
    pub fn last(&self) -> &T {
        &self.0[self.0.len() - 1]
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)] // never empty
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    /// Apply `f` to every element, preserving non-emptiness.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> NonEmptyVec<U> {
        NonEmptyVec(self.0.into_iter().map(f).collect())
    }
}

impl<T> Deref for NonEmptyVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for NonEmptyVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> TryFrom<Vec<T>> for NonEmptyVec<T> {
    type Error = EmptyVecError;

    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> From<NonEmptyVec<T>> for Vec<T> {
    fn from(value: NonEmptyVec<T>) -> Self {
        value.0
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmptyVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for NonEmptyVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NonEmptyVec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::new(items).map_err(D::Error::custom)
    }
}
