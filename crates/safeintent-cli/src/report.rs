//! Inspection report: what a receiver would see through the guard.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use safeintent_core::{load_intent, Diagnostic, GuardConfig, MemorySink, SafeIntent};
use safeintent_model::{Bundle, Intent, RawIntent};
use serde::Serialize;
use tracing::debug;

/// A field read requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldQuery {
    Has(String),
    Bool { name: String, default: bool },
    Int { name: String, default: i32 },
    String(String),
    StringList(String),
    Bundle(String),
}

impl FieldQuery {
    /// Parse `NAME[=DEFAULT]` for a boolean read. Default is `false`.
    pub fn bool(spec: &str) -> Result<Self> {
        let (name, default) = split_default(spec);
        let default = default
            .map(str::parse::<bool>)
            .transpose()
            .with_context(|| format!("invalid bool default in '{spec}'"))?
            .unwrap_or(false);
        Ok(Self::Bool { name, default })
    }

    /// Parse `NAME[=DEFAULT]` for an integer read. Default is `0`.
    pub fn int(spec: &str) -> Result<Self> {
        let (name, default) = split_default(spec);
        let default = default
            .map(str::parse::<i32>)
            .transpose()
            .with_context(|| format!("invalid int default in '{spec}'"))?
            .unwrap_or(0);
        Ok(Self::Int { name, default })
    }

    fn read<I: RawIntent>(&self, safe: &SafeIntent<I>) -> FieldReading {
        let (name, value) = match self {
            Self::Has(name) => (name, FieldValue::Bool(safe.has_extra(name))),
            Self::Bool { name, default } => (name, FieldValue::Bool(safe.bool_extra(name, *default))),
            Self::Int { name, default } => (name, FieldValue::Int(safe.int_extra(name, *default))),
            Self::String(name) => (name, FieldValue::String(safe.string_extra(name))),
            Self::StringList(name) => (name, FieldValue::StringList(safe.string_list_extra(name))),
            Self::Bundle(name) => (name, FieldValue::Bundle(safe.bundle_extra(name))),
        };
        FieldReading {
            name: name.clone(),
            kind: self.kind(),
            value,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Has(_) => "has",
            Self::Bool { .. } => "bool",
            Self::Int { .. } => "int",
            Self::String(_) => "string",
            Self::StringList(_) => "string_list",
            Self::Bundle(_) => "bundle",
        }
    }
}

fn split_default(spec: &str) -> (String, Option<&str>) {
    match spec.split_once('=') {
        Some((name, default)) => (name.to_string(), Some(default)),
        None => (spec.to_string(), None),
    }
}

/// Result of one requested read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReading {
    pub name: String,
    pub kind: &'static str,
    pub value: FieldValue,
}

/// Value returned by a guarded read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i32),
    String(Option<String>),
    StringList(Option<Vec<String>>),
    Bundle(Option<Bundle>),
}

/// Everything the guard returned for one intent.
#[derive(Debug, Clone, Serialize)]
pub struct IntentReport {
    pub action: Option<String>,
    /// Set when the unguarded action read failed.
    pub action_error: Option<String>,
    pub data: Option<String>,
    pub data_string: Option<String>,
    pub extras_keys: Option<Vec<String>>,
    pub fields: Vec<FieldReading>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Wrap `intent` and read the standard fields plus every query.
pub fn inspect(intent: Intent, config: &GuardConfig, queries: &[FieldQuery]) -> IntentReport {
    let sink = Arc::new(MemorySink::new());
    let safe = SafeIntent::with_config(Some(intent), config, sink.clone());

    let (action, action_error) = match safe.action() {
        Ok(action) => (action, None),
        Err(err) => (None, Some(err.to_string())),
    };
    let data = safe.data().map(|uri| uri.to_string());
    let data_string = safe.data_string();
    let extras_keys = safe
        .extras()
        .map(|extras| extras.keys().map(str::to_string).collect());
    let fields = queries.iter().map(|query| query.read(&safe)).collect();

    let diagnostics = sink.records();
    debug!(count = diagnostics.len(), "inspection finished");

    IntentReport {
        action,
        action_error,
        data,
        data_string,
        extras_keys,
        fields,
        diagnostics,
    }
}

/// Load a payload file and inspect it.
pub fn inspect_file(path: &Path, config: &GuardConfig, queries: &[FieldQuery]) -> Result<IntentReport> {
    let intent = load_intent(path, config.parcel)
        .with_context(|| format!("loading payload {}", path.display()))?;
    Ok(inspect(intent, config, queries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use safeintent_model::ParcelLimits;
    use std::fs;
    use tempfile::TempDir;

    fn intent(raw: &str) -> Intent {
        Intent::from_json(raw.as_bytes(), ParcelLimits::default()).unwrap()
    }

    #[test]
    fn test_query_parsing() {
        assert_eq!(
            FieldQuery::int("tab_count=3").unwrap(),
            FieldQuery::Int {
                name: "tab_count".to_string(),
                default: 3
            }
        );
        assert_eq!(
            FieldQuery::bool("private").unwrap(),
            FieldQuery::Bool {
                name: "private".to_string(),
                default: false
            }
        );
        assert!(FieldQuery::int("n=abc").is_err());
        assert!(FieldQuery::bool("b=yes").is_err());
    }

    #[test]
    fn test_report_on_clean_intent() {
        let report = inspect(
            intent(
                r#"{
                "action": "android.intent.action.VIEW",
                "data": "about:reader?url=https://example.com/page",
                "extras": {"private_tab": {"type": "bool", "value": true}}
            }"#,
            ),
            &GuardConfig::default(),
            &[
                FieldQuery::bool("private_tab").unwrap(),
                FieldQuery::Has("absent".to_string()),
            ],
        );

        assert_eq!(report.action.as_deref(), Some("android.intent.action.VIEW"));
        assert_eq!(report.data.as_deref(), Some("https://example.com/page"));
        assert_eq!(report.extras_keys, Some(vec!["private_tab".to_string()]));
        assert_eq!(report.fields[0].value, FieldValue::Bool(true));
        assert_eq!(report.fields[1].value, FieldValue::Bool(false));
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_report_on_corrupt_extras() {
        let report = inspect(
            intent(r#"{"extras": {"n": {"type": "int", "value": []}}}"#),
            &GuardConfig::default(),
            &[FieldQuery::int("n=5").unwrap()],
        );

        assert_eq!(report.extras_keys, None);
        assert_eq!(report.fields[0].value, FieldValue::Int(5));
        assert_eq!(report.diagnostics.len(), 2);
    }

    #[test]
    fn test_report_serializes() {
        let report = inspect(Intent::new(), &GuardConfig::default(), &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["action"], serde_json::Value::Null);
        assert_eq!(json["fields"], serde_json::json!([]));
    }

    #[test]
    fn test_inspect_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("intent.json");
        fs::write(&path, r#"{"action": "android.intent.action.MAIN"}"#).unwrap();

        let report = inspect_file(&path, &GuardConfig::default(), &[]).unwrap();
        assert_eq!(report.action.as_deref(), Some("android.intent.action.MAIN"));

        let missing = temp_dir.path().join("missing.json");
        assert!(inspect_file(&missing, &GuardConfig::default(), &[]).is_err());
    }
}
