//! Tagged extras values.

use serde::{Deserialize, Serialize};

use crate::bundle::Bundle;

/// A single typed value stored in a [`Bundle`].
///
/// Serialized adjacently tagged, e.g. `{"type": "int", "value": 3}`, so the
/// declared type travels with the value and a sender cannot make an integer
/// look like a string by shape alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ExtraValue {
    /// Boolean flag.
    Bool(bool),
    /// 32-bit signed integer.
    Int(i32),
    /// UTF-8 string.
    String(String),
    /// Ordered list of strings.
    StringList(Vec<String>),
    /// Nested extras.
    Bundle(Bundle),
}

impl ExtraValue {
    /// Name of the variant, as used on the wire and in mismatch logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            ExtraValue::Bool(_) => "bool",
            ExtraValue::Int(_) => "int",
            ExtraValue::String(_) => "string",
            ExtraValue::StringList(_) => "string_list",
            ExtraValue::Bundle(_) => "bundle",
        }
    }
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        ExtraValue::Bool(value)
    }
}

impl From<i32> for ExtraValue {
    fn from(value: i32) -> Self {
        ExtraValue::Int(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        ExtraValue::String(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        ExtraValue::String(value)
    }
}

impl From<Vec<String>> for ExtraValue {
    fn from(value: Vec<String>) -> Self {
        ExtraValue::StringList(value)
    }
}

impl From<Bundle> for ExtraValue {
    fn from(value: Bundle) -> Self {
        ExtraValue::Bundle(value)
    }
}
