//! # SafeIntent Core
//!
//! Fault isolation for intents received from other applications.
//!
//! ## Threat Coverage
//!
//! External applications can put anything into an intent. Reading a field
//! from a malformed payload can fail, and an unguarded failure would take the
//! receiving application down with it:
//!
//! | Threat | Guard | Outcome |
//! |--------|-------|---------|
//! | Oversized / flooded extras | [`SafeIntent`] accessors | Default, OOM warning |
//! | Corrupt extras, type confusion | [`SafeIntent`] accessors | Default, warning with cause |
//! | Panicking intent implementation | [`SafeIntent`] accessors | Default, warning with cause |
//! | Reader-mode URL wrapping | [`sanitize`] at construction | Prefix stripped |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         SAFE INTENT                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │   untrusted Intent ──► sanitize ──► SafeIntent ──► accessors    │
//! │                                          │                      │
//! │                                          ▼                      │
//! │                                   DiagnosticSink                │
//! │                                 (tracing / memory)              │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use safeintent_core::SafeIntent;
//! use safeintent_model::{Intent, ParcelLimits};
//!
//! let raw = br#"{
//!     "action": "android.intent.action.VIEW",
//!     "data": "about:reader?url=https://example.com/page",
//!     "extras": {"tab_count": {"type": "int", "value": "not a number"}}
//! }"#;
//! let intent = Intent::from_json(raw, ParcelLimits::default())?;
//! let safe = SafeIntent::new(intent);
//!
//! assert_eq!(safe.data_string().as_deref(), Some("https://example.com/page"));
//! // The corrupt extras fail to decode; the caller just sees the default.
//! assert_eq!(safe.int_extra("tab_count", 1), 1);
//! # Ok::<(), serde_json::Error>(())
//! ```
//!
//! ## Security Notes
//!
//! - Guarded accessors never return errors and never panic on delegate failure
//! - `action()` is deliberately left unguarded and returns `Result`
//! - `unsafe_intent()` bypasses every guard

mod config;
mod error;
mod payload;
mod safe_intent;
pub mod sanitize;
mod sink;

pub use config::{GuardConfig, DEFAULT_LOG_TAG, READER_URL_PREFIX};
pub use error::SafeIntentError;
pub use payload::load_intent;
pub use safe_intent::SafeIntent;
pub use sanitize::SanitizeOutcome;
pub use sink::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};

// Re-export model types for convenience
pub use safeintent_model::{AccessError, Bundle, DataUri, ExtraValue, Intent, ParcelLimits, RawIntent};

/// Core result type for configuration and payload loading.
pub type Result<T> = std::result::Result<T, SafeIntentError>;
