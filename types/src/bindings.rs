//! Do-notation: building a named-field context one step at a time.
//!
//! ```
//! use keel_types::{Bindings, begin, ok};
//!
//! let ctx = begin::<String>()
//!     .bind("x", |_| ok(1_i32))
//!     .bind("y", |ctx| ctx.require::<i32>("x").map(|x| x + 1).map_err(|e| e.to_string()))
//!     .expect("both steps succeed");
//!
//! assert_eq!(ctx.get::<i32>("x"), Some(&1));
//! assert_eq!(ctx.get::<i32>("y"), Some(&2));
//! ```
//!
//! Each step produces a new [`Bindings`]; values are shared between
//! generations through `Rc`, so earlier accumulators stay valid and
//! unchanged.

use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;
use std::option::Option as StdOption;
use std::rc::Rc;

use thiserror::Error;

use crate::option::{self, Option};
use crate::result::{self, Result};

type Name = Cow<'static, str>;

/// Insertion-ordered name → value mapping.
#[derive(Clone, Default)]
pub struct Bindings {
    entries: Vec<(Name, Rc<dyn Any>)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("no binding named `{name}`")]
    Missing { name: String },
    #[error("binding `{name}` does not hold a `{expected}`")]
    WrongType { name: String, expected: &'static str },
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in the order they were bound.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(bound, _)| bound == name)
    }

    /// The value bound to `name`, if present and of type `V`.
    #[must_use]
    pub fn get<V: 'static>(&self, name: &str) -> StdOption<&V> {
        self.slot(name)?.downcast_ref::<V>()
    }

    /// Like [`Bindings::get`], cloned into an [`Option`].
    pub fn value<V: Clone + 'static>(&self, name: &str) -> Option<V> {
        option::Option::from_std(self.get::<V>(name).cloned())
    }

    /// Like [`Bindings::get`], failing with a reason.
    pub fn require<V: 'static>(&self, name: &str) -> Result<&V, BindingError> {
        let Some(slot) = self.slot(name) else {
            return result::err(BindingError::Missing {
                name: name.to_string(),
            });
        };
        match slot.downcast_ref::<V>() {
            Some(value) => result::ok(value),
            None => result::err(BindingError::WrongType {
                name: name.to_string(),
                expected: type_name::<V>(),
            }),
        }
    }

    /// A new accumulator with `name` added. An existing name keeps its
    /// original value.
    #[must_use]
    pub fn with<V: 'static>(&self, name: impl Into<Name>, value: V) -> Self {
        let name = name.into();
        let mut next = self.clone();
        if self.contains(&name) {
            tracing::warn!(name = %name, "Binding already present; keeping the first value");
            return next;
        }
        next.entries.push((name, Rc::new(value)));
        next
    }

    fn slot(&self, name: &str) -> StdOption<&dyn Any> {
        self.entries
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value.as_ref())
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Start a Do-notation chain: Ok of an empty accumulator.
pub fn begin<E>() -> Result<Bindings, E> {
    result::ok(Bindings::new())
}

impl<E> Result<Bindings, E> {
    /// Run a fallible step against the accumulator and bind its value to
    /// `name`. An Err from the step ends the chain.
    pub fn bind<V: 'static>(
        self,
        name: impl Into<Name>,
        f: impl FnOnce(&Bindings) -> Result<V, E>,
    ) -> Result<Bindings, E> {
        self.and_then(|ctx| f(&ctx).map(|value| ctx.with(name, value)))
    }

    /// Bind the plain value computed by `f`. Never short-circuits.
    pub fn let_<V: 'static>(
        self,
        name: impl Into<Name>,
        f: impl FnOnce(&Bindings) -> V,
    ) -> Result<Bindings, E> {
        self.map(|ctx| {
            let value = f(&ctx);
            ctx.with(name, value)
        })
    }
}
