//! Adapter from a Result-returning validator to the generic validation
//! shape shared by schema libraries: a versioned, vendor-named object whose
//! `validate` yields either `{value}` or `{issues: [{message}]}`.

use serde::{Deserialize, Serialize};

use crate::result::{Result, Variant};

pub const STANDARD_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOutcome<T> {
    Value { value: T },
    Issues { issues: Vec<Issue> },
}

impl<T> SchemaOutcome<T> {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Value { .. })
    }
}

/// A validator wrapped for consumption by schema-aware frameworks.
pub struct StandardSchema<F> {
    vendor: String,
    validator: F,
}

pub fn to_standard_schema<F>(vendor: impl Into<String>, validator: F) -> StandardSchema<F> {
    StandardSchema {
        vendor: vendor.into(),
        validator,
    }
}

impl<F> StandardSchema<F> {
    #[must_use]
    pub const fn version(&self) -> u32 {
        STANDARD_SCHEMA_VERSION
    }

    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Run the validator. An Err becomes a single issue whose message is the
    /// error as JSON, or its debug form when it has no JSON form.
    pub fn validate<I, T, E>(&self, input: I) -> SchemaOutcome<T>
    where
        F: Fn(I) -> Result<T, E>,
        E: Serialize + std::fmt::Debug,
    {
        match (self.validator)(input).into_variant() {
            Variant::Ok(value) => SchemaOutcome::Value { value },
            Variant::Err(error) => SchemaOutcome::Issues {
                issues: vec![Issue {
                    message: stringify(&error),
                }],
            },
        }
    }
}

fn stringify<E: Serialize + std::fmt::Debug>(error: &E) -> String {
    serde_json::to_string(error).unwrap_or_else(|_| format!("{error:?}"))
}
