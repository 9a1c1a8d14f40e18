//! # Diagnostic Sink
//!
//! Guards report every caught failure to an injected sink instead of a
//! global logger. The default sink forwards to `tracing`; [`MemorySink`]
//! keeps the records for hosts (and tests) that want to inspect them.
//!
//! Diagnostics are informational only. Nothing downstream may branch on
//! them: a guarded read that failed looks like an absent field to callers.

use std::sync::{Mutex, PoisonError};

use safeintent_model::AccessError;
use serde::Serialize;
use tracing::warn;

/// Receiver of warnings about caught failures.
pub trait DiagnosticSink: Send + Sync {
    /// Record a warning. `cause` is `None` for resource exhaustion.
    fn warn(&self, tag: &str, message: &str, cause: Option<&AccessError>);
}

/// Sink that emits `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, tag: &str, message: &str, cause: Option<&AccessError>) {
        match cause {
            Some(cause) => warn!(tag, %cause, "{}", message),
            None => warn!(tag, "{}", message),
        }
    }
}

/// A recorded warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Component tag.
    pub tag: String,
    /// Human-readable message.
    pub message: String,
    /// Error text, absent for resource exhaustion.
    pub cause: Option<String>,
}

/// Sink that stores every warning in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded warnings, oldest first.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded warnings.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn warn(&self, tag: &str, message: &str, cause: Option<&AccessError>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                tag: tag.to_string(),
                message: message.to_string(),
                cause: cause.map(ToString::to_string),
            });
    }
}
