//! Tagged domain errors.
//!
//! A lightweight convention for caller-defined error values: a literal `tag`
//! discriminant, an optional `namespace`, and a bag of JSON fields.
//!
//! ```
//! use keel_types::error_tag::create_error_group;
//!
//! let http = create_error_group("http");
//! let not_found = http.create("NotFound").create([("path", "/missing")]);
//!
//! assert!(http.is(&not_found));
//! assert!(http.is_tag("NotFound")(&not_found));
//! assert_eq!(not_found.field("path"), Some(&"/missing".into()));
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

type Label = Cow<'static, str>;

/// Field names that would shadow the discriminant in the flattened form.
const RESERVED: [&str; 2] = ["tag", "namespace"];

/// An immutable error record. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{}", self.qualified_tag())]
pub struct TaggedError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<Label>,
    tag: Label,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl TaggedError {
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// `namespace/tag`, or just `tag` outside a group.
    #[must_use]
    pub fn qualified_tag(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}/{}", self.tag),
            None => self.tag.to_string(),
        }
    }
}

/// Builds [`TaggedError`]s that share one tag (and namespace, if grouped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFactory {
    namespace: Option<Label>,
    tag: Label,
}

impl ErrorFactory {
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// An error carrying `fields`. Entries named `tag` or `namespace` are
    /// dropped; the factory owns those.
    pub fn create<K, V>(&self, fields: impl IntoIterator<Item = (K, V)>) -> TaggedError
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut bag = Map::new();
        for (name, value) in fields {
            let name = name.into();
            if RESERVED.contains(&name.as_str()) {
                tracing::debug!(field = %name, tag = %self.tag, "Dropping reserved error field");
                continue;
            }
            bag.insert(name, value.into());
        }
        TaggedError {
            namespace: self.namespace.clone(),
            tag: self.tag.clone(),
            fields: bag,
        }
    }

    /// An error with no fields.
    #[must_use]
    pub fn bare(&self) -> TaggedError {
        self.create(std::iter::empty::<(String, Value)>())
    }
}

pub fn create_error(tag: impl Into<Label>) -> ErrorFactory {
    ErrorFactory {
        namespace: None,
        tag: tag.into(),
    }
}

/// Factories sharing a namespace, plus membership tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorGroup {
    namespace: Label,
}

pub fn create_error_group(namespace: impl Into<Label>) -> ErrorGroup {
    ErrorGroup {
        namespace: namespace.into(),
    }
}

impl ErrorGroup {
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn create(&self, tag: impl Into<Label>) -> ErrorFactory {
        ErrorFactory {
            namespace: Some(self.namespace.clone()),
            tag: tag.into(),
        }
    }

    #[must_use]
    pub fn is(&self, error: &TaggedError) -> bool {
        error.namespace() == Some(self.namespace.as_ref())
    }

    /// Predicate matching this namespace and `tag`.
    pub fn is_tag(&self, tag: impl Into<Label>) -> impl Fn(&TaggedError) -> bool {
        let namespace = self.namespace.clone();
        let tag = tag.into();
        move |error| error.namespace() == Some(namespace.as_ref()) && error.tag() == tag
    }
}

/// Exhaustiveness guard for values that must never exist at runtime.
///
/// # Panics
///
/// Always, with the value's debug form.
pub fn assert_never<T: fmt::Debug>(value: T) -> ! {
    tracing::error!(value = ?value, "Unreachable value reached");
    panic!("unexpected value: {value:?}")
}
