//! Result and Option algebra for Keel.
//!
//! Tagged, immutable success/failure and presence/absence values with a
//! total combinator surface, cooperative early return, named-field
//! accumulation, and a versioned JSON form. No IO, no async; the async
//! wrapper lives in `keel-future` and depends on this crate one way.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panicking extractors document themselves
#![allow(clippy::module_name_repetitions)]

pub mod bindings;
pub mod brand;
pub mod combinators;
pub mod error_tag;
pub mod flow;
pub mod json;
pub mod nonempty;
pub mod option;
pub mod panic;
pub mod report;
pub mod result;
pub mod schema;
pub mod settings;
pub mod unchecked;
mod unwrap;

pub use bindings::{BindingError, Bindings, begin};
pub use brand::{Family, Tag, Tagged, family_of, is_option, is_result};
pub use error_tag::{ErrorFactory, ErrorGroup, TaggedError, assert_never, create_error, create_error_group};
pub use flow::{Bail, Flow, safe_try, settle};
pub use json::{JsonError, SCHEMA_VERSION};
pub use nonempty::{EmptyVecError, NonEmptyVec};
pub use option::{Option, none, some};
pub use panic::Panic;
pub use result::{Result, Variant, err, ok, try_catch};
pub use schema::{SchemaOutcome, StandardSchema, to_standard_schema};
pub use settings::Settings;
pub use unwrap::UnwrapError;
