//! JSON wire format for Result and Option.
//!
//! ```text
//! {"tag":"Ok",  "schemaVersion":1, "value":T}
//! {"tag":"Err", "schemaVersion":1, "error":E}
//! {"tag":"Some","schemaVersion":1, "value":T}
//! {"tag":"None","schemaVersion":1}
//! ```
//!
//! `schemaVersion` is always written. On input it may be absent (legacy
//! documents written before versioning); versions newer than
//! [`SCHEMA_VERSION`] are rejected.

use std::option::Option as StdOption;
use std::result::Result as StdResult;

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::brand::{Family, Tag};
use crate::option::{self, Option};
use crate::result::{self, Result, Variant};

pub const SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("{family} document has no string `tag` field")]
    MissingTag { family: Family },
    #[error("invalid {family} tag {found:?} (expected {expected})")]
    InvalidTag {
        family: Family,
        found: String,
        expected: &'static str,
    },
    #[error("unsupported schemaVersion {found} (newest supported is {SCHEMA_VERSION})")]
    UnsupportedVersion { found: u64 },
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Envelope shared by both families. Payload slots default to `null` so that
/// unit-like payloads survive a round trip.
#[derive(Deserialize)]
struct Envelope {
    tag: StdOption<String>,
    #[serde(rename = "schemaVersion")]
    schema_version: StdOption<u64>,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    error: Value,
}

impl Envelope {
    fn tag(&self, family: Family) -> StdResult<Tag, JsonError> {
        if let Some(found) = self.schema_version
            && found > SCHEMA_VERSION
        {
            return Err(JsonError::UnsupportedVersion { found });
        }
        let raw = self
            .tag
            .as_deref()
            .ok_or(JsonError::MissingTag { family })?;
        Tag::parse(raw)
            .filter(|tag| tag.family() == family)
            .ok_or_else(|| JsonError::InvalidTag {
                family,
                found: raw.to_string(),
                expected: match family {
                    Family::Result => "\"Ok\" or \"Err\"",
                    Family::Option => "\"Some\" or \"None\"",
                },
            })
    }

    fn into_result<T: DeserializeOwned, E: DeserializeOwned>(
        self,
    ) -> StdResult<Result<T, E>, JsonError> {
        match self.tag(Family::Result)? {
            Tag::Ok => Ok(result::ok(serde_json::from_value(self.value)?)),
            _ => Ok(result::err(serde_json::from_value(self.error)?)),
        }
    }

    fn into_option<T: DeserializeOwned>(self) -> StdResult<Option<T>, JsonError> {
        match self.tag(Family::Option)? {
            Tag::Some => Ok(option::some(serde_json::from_value(self.value)?)),
            _ => Ok(option::none()),
        }
    }
}

impl<T: Serialize, E: Serialize> Result<T, E> {
    /// Encode in the tagged, versioned wire form.
    ///
    /// Fails only when the payload itself cannot be represented as JSON
    /// (for example a map with non-string keys).
    pub fn to_json(&self) -> StdResult<Value, JsonError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T: DeserializeOwned, E: DeserializeOwned> Result<T, E> {
    /// Decode the wire form. Legacy documents without `schemaVersion` are
    /// accepted.
    pub fn from_json(value: Value) -> StdResult<Self, JsonError> {
        serde_json::from_value::<Envelope>(value)?.into_result()
    }

    pub fn from_json_str(text: &str) -> StdResult<Self, JsonError> {
        serde_json::from_str::<Envelope>(text)?.into_result()
    }
}

impl<T: Serialize> Option<T> {
    pub fn to_json(&self) -> StdResult<Value, JsonError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T: DeserializeOwned> Option<T> {
    pub fn from_json(value: Value) -> StdResult<Self, JsonError> {
        serde_json::from_value::<Envelope>(value)?.into_option()
    }

    pub fn from_json_str(text: &str) -> StdResult<Self, JsonError> {
        serde_json::from_str::<Envelope>(text)?.into_option()
    }
}

impl<T: Serialize, E: Serialize> Serialize for Result<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Result", 3)?;
        state.serialize_field("tag", self.tag().as_str())?;
        state.serialize_field("schemaVersion", &SCHEMA_VERSION)?;
        match self.as_variant() {
            Variant::Ok(value) => state.serialize_field("value", value)?,
            Variant::Err(error) => state.serialize_field("error", error)?,
        }
        state.end()
    }
}

impl<'de, T: DeserializeOwned, E: DeserializeOwned> Deserialize<'de> for Result<T, E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        Envelope::deserialize(deserializer)?
            .into_result()
            .map_err(D::Error::custom)
    }
}

impl<T: Serialize> Serialize for Option<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        let value = self.as_std();
        let mut state = serializer.serialize_struct("Option", if value.is_some() { 3 } else { 2 })?;
        state.serialize_field("tag", self.tag().as_str())?;
        state.serialize_field("schemaVersion", &SCHEMA_VERSION)?;
        if let Some(value) = value {
            state.serialize_field("value", value)?;
        }
        state.end()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Option<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        Envelope::deserialize(deserializer)?
            .into_option()
            .map_err(D::Error::custom)
    }
}
