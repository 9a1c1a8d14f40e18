//! # Extras Bundle
//!
//! A mapping from field name to [`ExtraValue`], with typed reads that follow
//! the platform's lenient contract: asking for the wrong type is not an error,
//! it returns the caller's default (or `None`) and leaves a debug trace.
//!
//! ## Typed Reads
//!
//! | Read | Absent | Wrong variant |
//! |------|--------|---------------|
//! | [`Bundle::get_bool`] | default | default |
//! | [`Bundle::get_int`] | default | default |
//! | [`Bundle::get_string`] | `None` | `None` |
//! | [`Bundle::get_string_list`] | `None` | `None` |
//! | [`Bundle::get_bundle`] | `None` | `None` |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::value::ExtraValue;

/// Named, heterogeneous extras carried by an intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    entries: BTreeMap<String, ExtraValue>,
}

impl Bundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under the same name.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<ExtraValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Builder form of [`Bundle::put`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.put(name, value);
        self
    }

    /// Returns true if a value of any type is stored under `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Raw access to a stored value.
    pub fn get(&self, name: &str) -> Option<&ExtraValue> {
        self.entries.get(name)
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bundle has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level field names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries including those of nested bundles.
    pub fn entry_count(&self) -> usize {
        self.entries
            .values()
            .map(|value| match value {
                ExtraValue::Bundle(nested) => 1 + nested.entry_count(),
                _ => 1,
            })
            .sum()
    }

    /// Read a boolean, or `default` if absent or not a boolean.
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        match self.entries.get(name) {
            Some(ExtraValue::Bool(value)) => *value,
            Some(other) => {
                type_warning(name, "bool", other, &default.to_string());
                default
            }
            None => default,
        }
    }

    /// Read an integer, or `default` if absent or not an integer.
    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        match self.entries.get(name) {
            Some(ExtraValue::Int(value)) => *value,
            Some(other) => {
                type_warning(name, "int", other, &default.to_string());
                default
            }
            None => default,
        }
    }

    /// Read a string.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.entries.get(name)? {
            ExtraValue::String(value) => Some(value.as_str()),
            other => {
                type_warning(name, "string", other, "<none>");
                None
            }
        }
    }

    /// Read a list of strings.
    pub fn get_string_list(&self, name: &str) -> Option<&[String]> {
        match self.entries.get(name)? {
            ExtraValue::StringList(value) => Some(value.as_slice()),
            other => {
                type_warning(name, "string_list", other, "<none>");
                None
            }
        }
    }

    /// Read a nested bundle.
    pub fn get_bundle(&self, name: &str) -> Option<&Bundle> {
        match self.entries.get(name)? {
            ExtraValue::Bundle(value) => Some(value),
            other => {
                type_warning(name, "bundle", other, "<none>");
                None
            }
        }
    }
}

fn type_warning(name: &str, expected: &str, actual: &ExtraValue, default: &str) {
    debug!(
        key = name,
        expected,
        actual = actual.type_name(),
        "extra has unexpected type, returning default {}",
        default
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Bundle {
        Bundle::new()
            .with("flag", true)
            .with("count", 3)
            .with("title", "Example")
            .with("tabs", vec!["a".to_string(), "b".to_string()])
            .with("nested", Bundle::new().with("inner", 1))
    }

    #[test]
    fn test_typed_reads_match_stored_values() {
        let bundle = sample();
        assert!(bundle.get_bool("flag", false));
        assert_eq!(bundle.get_int("count", 0), 3);
        assert_eq!(bundle.get_string("title"), Some("Example"));
        assert_eq!(
            bundle.get_string_list("tabs"),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert_eq!(bundle.get_bundle("nested").unwrap().get_int("inner", 0), 1);
    }

    #[test]
    fn test_absent_fields_return_defaults() {
        let bundle = Bundle::new();
        assert!(bundle.get_bool("missing", true));
        assert_eq!(bundle.get_int("missing", 42), 42);
        assert_eq!(bundle.get_string("missing"), None);
        assert_eq!(bundle.get_string_list("missing"), None);
        assert!(bundle.get_bundle("missing").is_none());
    }

    #[test]
    fn test_type_mismatch_returns_defaults() {
        let bundle = sample();
        assert_eq!(bundle.get_int("title", 9), 9);
        assert!(!bundle.get_bool("count", false));
        assert_eq!(bundle.get_string("flag"), None);
        assert_eq!(bundle.get_string_list("title"), None);
        assert!(bundle.get_bundle("tabs").is_none());
    }

    #[test]
    fn test_entry_count_includes_nested() {
        let bundle = sample();
        assert_eq!(bundle.len(), 5);
        assert_eq!(bundle.entry_count(), 6);
    }

    #[test]
    fn test_keys_are_sorted() {
        let bundle = sample();
        let keys: Vec<&str> = bundle.keys().collect();
        assert_eq!(keys, vec!["count", "flag", "nested", "tabs", "title"]);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let bundle = Bundle::new().with("count", 3);
        assert_eq!(
            serde_json::to_value(&bundle).unwrap(),
            json!({"count": {"type": "int", "value": 3}})
        );
    }
}
