//! Runtime identity for Result and Option instances.
//!
//! Every genuine `Result` and `Option` reports its family's [`Brand`] through a
//! sealed method of [`Tagged`]. External types may implement `Tagged` to expose
//! the same tag shape, but they cannot override the sealed method, so the
//! identity checks below reject them.
//!
//! Only two brands exist, both private statics. Identity is pointer identity
//! against those statics.

use std::fmt;
use std::ptr;

use serde::{Deserialize, Serialize};

pub(crate) mod sealed {
    /// Argument to the sealed brand accessor. Unnameable outside this crate,
    /// which keeps `Tagged::brand` from being called or overridden externally.
    #[derive(Debug, Clone, Copy)]
    pub struct Seal;
}

use sealed::Seal;

/// The two families of tagged values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Result,
    Option,
}

impl Family {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Family::Result => "Result",
            Family::Option => "Option",
        }
    }

    /// Tags belonging to this family, in declaration order.
    #[must_use]
    pub const fn tags(self) -> [Tag; 2] {
        match self {
            Family::Result => [Tag::Ok, Tag::Err],
            Family::Option => [Tag::Some, Tag::None],
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant discriminant shared by both families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Ok,
    Err,
    Some,
    None,
}

impl Tag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::Ok => "Ok",
            Tag::Err => "Err",
            Tag::Some => "Some",
            Tag::None => "None",
        }
    }

    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Tag::Ok | Tag::Err => Family::Result,
            Tag::Some | Tag::None => Family::Option,
        }
    }

    /// Parse a wire tag. Matching is exact; `"ok"` is not a tag.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Ok" => Some(Tag::Ok),
            "Err" => Some(Tag::Err),
            "Some" => Some(Tag::Some),
            "None" => Some(Tag::None),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-family identity marker.
///
/// There is no public constructor. The only instances are the crate's two
/// statics, handed out by reference through the sealed accessor.
#[derive(Debug)]
pub struct Brand {
    family: Family,
}

impl Brand {
    #[must_use]
    pub const fn family(&self) -> Family {
        self.family
    }
}

static RESULT_BRAND: Brand = Brand {
    family: Family::Result,
};

static OPTION_BRAND: Brand = Brand {
    family: Family::Option,
};

pub(crate) fn result_brand() -> &'static Brand {
    &RESULT_BRAND
}

pub(crate) fn option_brand() -> &'static Brand {
    &OPTION_BRAND
}

/// Anything exposing a `{tag, ...}` shape.
///
/// Implementing this trait for a foreign type is allowed and is how
/// duck-typed values are fed to [`is_result`] / [`is_option`]. Such values
/// always fail those checks: only this crate can supply a brand.
#[allow(private_interfaces)] // `Seal` is unnameable on purpose
pub trait Tagged {
    /// The discriminant as it appears on the wire.
    fn tag_name(&self) -> &str;

    #[doc(hidden)]
    fn brand(&self, _seal: Seal) -> Option<&'static Brand> {
        None
    }
}

/// True only for genuine `Result` instances built by this crate.
#[must_use]
pub fn is_result(value: &dyn Tagged) -> bool {
    value
        .brand(Seal)
        .is_some_and(|brand| ptr::eq(brand, result_brand()))
}

/// True only for genuine `Option` instances built by this crate.
#[must_use]
pub fn is_option(value: &dyn Tagged) -> bool {
    value
        .brand(Seal)
        .is_some_and(|brand| ptr::eq(brand, option_brand()))
}

/// Family of a genuine instance, or `None` for anything unbranded.
#[must_use]
pub fn family_of(value: &dyn Tagged) -> Option<Family> {
    value.brand(Seal).map(Brand::family)
}
