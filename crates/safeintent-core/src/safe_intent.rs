//! The guarded intent accessor.
//!
//! This module provides [`SafeIntent`], the one type callers use to read an
//! intent that came from another application. Every read except
//! [`SafeIntent::action`] and the escape hatches is guarded: a failure in the
//! wrapped intent is reported to the diagnostic sink and replaced by a
//! default.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use safeintent_model::{AccessError, Bundle, DataUri, Intent, RawIntent};

use crate::config::GuardConfig;
use crate::sanitize::sanitize_data_uri;
use crate::sink::{DiagnosticSink, TracingSink};

/// Fault reported when reading from a wrapper that holds no intent.
const NO_INTENT: &str = "no intent to read from";

/// Fault-isolating wrapper around an intent from an untrusted sender.
///
/// # Security Model
///
/// The wrapped intent is treated as hostile. Its extras may be oversized,
/// corrupt or of unexpected types, and reading them may fail. Guarded reads
/// recover locally:
///
/// | Failure | Logged | Returned |
/// |---------|--------|----------|
/// | [`AccessError::ResourceExhausted`] | message only | fallback |
/// | [`AccessError::Runtime`] | message and cause | fallback |
/// | Panic in the intent (if `catch_panics`) | message and cause | fallback |
///
/// Callers cannot tell a failed read from an absent field, and need no error
/// handling of their own.
///
/// [`SafeIntent::action`] is the exception: it is not guarded and returns the
/// delegate's error as is. [`SafeIntent::unsafe_intent`] hands out the raw
/// intent for callers that accept the risk.
///
/// # Example
///
/// ```rust
/// use safeintent_core::SafeIntent;
/// use safeintent_model::{DataUri, Intent};
///
/// let intent = Intent::new().with_data("about:reader?url=https://example.com/page");
/// let safe = SafeIntent::new(intent);
///
/// assert_eq!(safe.data(), Some(DataUri::parse("https://example.com/page")));
/// assert_eq!(safe.int_extra("missing", 42), 42);
/// ```
pub struct SafeIntent<I = Intent> {
    intent: Option<I>,
    tag: String,
    catch_panics: bool,
    sink: Arc<dyn DiagnosticSink>,
}

impl<I: RawIntent> SafeIntent<I> {
    /// Wrap an intent with the default configuration, logging through `tracing`.
    pub fn new(intent: I) -> Self {
        Self::from_nullable(Some(intent))
    }

    /// Wrap an intent that may be absent.
    ///
    /// With no intent, guarded reads log a runtime fault and return their
    /// fallback; [`SafeIntent::action`] returns an error.
    pub fn from_nullable(intent: Option<I>) -> Self {
        Self::with_config(intent, &GuardConfig::default(), Arc::new(TracingSink))
    }

    /// Wrap an intent with explicit configuration and diagnostic sink.
    ///
    /// The data URI is sanitized here. If it cannot be read, a warning is
    /// logged and the intent is kept unchanged; construction itself never
    /// fails.
    pub fn with_config(
        mut intent: Option<I>,
        config: &GuardConfig,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        if let Some(inner) = intent.as_mut() {
            if let Err(err) = sanitize_data_uri(inner, config.strip_prefixes.as_slice()) {
                sink.warn(
                    &config.log_tag,
                    "Couldn't sanitize intent data; leaving it unchanged.",
                    Some(&err),
                );
            }
        }

        Self {
            intent,
            tag: config.log_tag.clone(),
            catch_panics: config.catch_panics,
            sink,
        }
    }

    /// Whether an extra of any type exists under `name`. `false` on failure.
    pub fn has_extra(&self, name: &str) -> bool {
        self.guarded("determine if intent had an extra", false, |intent| {
            intent.has_extra(name)
        })
    }

    /// A copy of all extras. `None` if absent or on failure.
    pub fn extras(&self) -> Option<Bundle> {
        self.guarded("get intent extras", None, I::extras)
    }

    /// Boolean extra, or `default` if absent, mistyped or on failure.
    pub fn bool_extra(&self, name: &str, default: bool) -> bool {
        self.guarded("get intent extras", default, |intent| {
            intent.bool_extra(name, default)
        })
    }

    /// Integer extra, or `default` if absent, mistyped or on failure.
    pub fn int_extra(&self, name: &str, default: i32) -> i32 {
        self.guarded("get intent extras", default, |intent| {
            intent.int_extra(name, default)
        })
    }

    /// String extra.
    pub fn string_extra(&self, name: &str) -> Option<String> {
        self.guarded("get intent extras", None, |intent| intent.string_extra(name))
    }

    /// Nested bundle extra.
    pub fn bundle_extra(&self, name: &str) -> Option<Bundle> {
        self.guarded("get intent extras", None, |intent| intent.bundle_extra(name))
    }

    /// The action string. Not guarded.
    ///
    /// # Errors
    ///
    /// Returns whatever the wrapped intent returns, and a runtime fault if
    /// there is no intent. Panics are not caught.
    pub fn action(&self) -> Result<Option<String>, AccessError> {
        match &self.intent {
            Some(intent) => intent.action(),
            None => Err(AccessError::runtime(NO_INTENT)),
        }
    }

    /// The sanitized data URI as text.
    pub fn data_string(&self) -> Option<String> {
        self.guarded("get intent data string", None, I::data_string)
    }

    /// String list extra.
    pub fn string_list_extra(&self, name: &str) -> Option<Vec<String>> {
        self.guarded("get intent extras", None, |intent| {
            intent.string_list_extra(name)
        })
    }

    /// The sanitized data URI.
    pub fn data(&self) -> Option<DataUri> {
        self.guarded("get intent data", None, I::data)
    }

    /// The wrapped intent, unguarded.
    pub fn unsafe_intent(&self) -> Option<&I> {
        self.intent.as_ref()
    }

    /// Unwrap into the raw intent.
    pub fn into_unsafe(self) -> Option<I> {
        self.intent
    }

    /// Tag attached to this wrapper's diagnostics.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn guarded<T>(
        &self,
        what: &str,
        fallback: T,
        read: impl FnOnce(&I) -> Result<T, AccessError>,
    ) -> T {
        match self.delegate(read) {
            Ok(value) => value,
            Err(AccessError::ResourceExhausted { .. }) => {
                self.sink
                    .warn(&self.tag, &format!("Couldn't {what}: OOM. Malformed?"), None);
                fallback
            }
            Err(err) => {
                self.sink
                    .warn(&self.tag, &format!("Couldn't {what}."), Some(&err));
                fallback
            }
        }
    }

    fn delegate<T>(&self, read: impl FnOnce(&I) -> Result<T, AccessError>) -> Result<T, AccessError> {
        let intent = self
            .intent
            .as_ref()
            .ok_or_else(|| AccessError::runtime(NO_INTENT))?;

        if !self.catch_panics {
            return read(intent);
        }

        panic::catch_unwind(AssertUnwindSafe(|| read(intent)))
            .unwrap_or_else(|payload| Err(AccessError::runtime(panic_message(payload.as_ref()))))
    }
}

impl<I: fmt::Debug> fmt::Debug for SafeIntent<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeIntent")
            .field("intent", &self.intent)
            .field("tag", &self.tag)
            .field("catch_panics", &self.catch_panics)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("intent panicked: {detail}")
}
