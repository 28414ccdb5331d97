//! Copy instructions declared by bundles

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A declarative `{from, to}` pair staging a file or directory into the build output.
///
/// Stored as the raw key/value mapping so that stray keys survive parsing and
/// can be rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CopyInstruction(BTreeMap<String, String>);

impl CopyInstruction {
    pub const FROM: &'static str = "from";
    pub const TO: &'static str = "to";

    /// Create a well-formed instruction
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::from_fields([(Self::FROM, from.into()), (Self::TO, to.into())])
    }

    /// Create an instruction from arbitrary fields
    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn from_path(&self) -> Option<&str> {
        self.0.get(Self::FROM).map(String::as_str)
    }

    pub fn to_path(&self) -> Option<&str> {
        self.0.get(Self::TO).map(String::as_str)
    }

    /// True when the key set is exactly `{from, to}`
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 2 && self.0.contains_key(Self::FROM) && self.0.contains_key(Self::TO)
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), JsonValue::String(value.clone())))
                .collect(),
        )
    }
}

impl fmt::Display for CopyInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .0
            .iter()
            .map(|(key, value)| format!("'{key}': '{value}'"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{fields}}}")
    }
}
