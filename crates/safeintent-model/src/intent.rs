//! # Intent
//!
//! The message another application hands us, and the fallible read
//! interface ([`RawIntent`]) that guards delegate to.
//!
//! ## Wire Form
//!
//! Incoming intents are described by [`IntentPayload`]:
//!
//! ```json
//! {
//!   "action": "android.intent.action.VIEW",
//!   "data": "about:reader?url=https://example.com/page",
//!   "extras": { "private_tab": { "type": "bool", "value": true } }
//! }
//! ```
//!
//! Only the envelope is validated when the payload is parsed. The `extras`
//! value is re-encoded into a [`Parcel`] and decoded on first access, so a
//! malformed extras section fails at read time, not at delivery time.

use serde::{Deserialize, Serialize};

use crate::bundle::Bundle;
use crate::error::Result;
use crate::parcel::{Parcel, ParcelLimits};
use crate::uri::DataUri;

/// Fallible read interface of an intent.
///
/// Every read may fail with an [`AccessError`](crate::AccessError). Guards
/// wrap an implementor of this trait and turn those failures into defaults.
pub trait RawIntent {
    /// Whether an extra of any type exists under `name`.
    fn has_extra(&self, name: &str) -> Result<bool>;

    /// A copy of all extras, or `None` if the intent carries none.
    fn extras(&self) -> Result<Option<Bundle>>;

    /// Boolean extra, or `default` if absent or of another type.
    fn bool_extra(&self, name: &str, default: bool) -> Result<bool>;

    /// Integer extra, or `default` if absent or of another type.
    fn int_extra(&self, name: &str, default: i32) -> Result<i32>;

    /// String extra.
    fn string_extra(&self, name: &str) -> Result<Option<String>>;

    /// Nested bundle extra.
    fn bundle_extra(&self, name: &str) -> Result<Option<Bundle>>;

    /// The action string.
    fn action(&self) -> Result<Option<String>>;

    /// The data URI as text.
    fn data_string(&self) -> Result<Option<String>>;

    /// String list extra.
    fn string_list_extra(&self, name: &str) -> Result<Option<Vec<String>>>;

    /// The data URI.
    fn data(&self) -> Result<Option<DataUri>>;

    /// Replace the data URI.
    fn set_data(&mut self, data: Option<DataUri>);
}

/// Serialized envelope of an incoming intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentPayload {
    /// Action string.
    #[serde(default)]
    pub action: Option<String>,
    /// Data URI text.
    #[serde(default)]
    pub data: Option<String>,
    /// Extras, kept undecoded.
    #[serde(default)]
    pub extras: Option<serde_json::Value>,
}

/// An intent message.
#[derive(Debug, Clone, Default)]
pub struct Intent {
    action: Option<String>,
    data: Option<DataUri>,
    extras: Option<Parcel>,
}

impl Intent {
    /// Create an intent with no action, data or extras.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an intent from its wire envelope.
    pub fn from_payload(payload: IntentPayload, limits: ParcelLimits) -> Self {
        let extras = payload
            .extras
            .map(|value| Parcel::from_bytes(value.to_string().into_bytes(), limits));
        Self {
            action: payload.action,
            data: payload.data.map(DataUri::parse),
            extras,
        }
    }

    /// Parse the wire envelope from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope itself is not valid JSON of the
    /// expected shape. The extras are not inspected here.
    pub fn from_json(bytes: &[u8], limits: ParcelLimits) -> serde_json::Result<Self> {
        let payload: IntentPayload = serde_json::from_slice(bytes)?;
        Ok(Self::from_payload(payload, limits))
    }

    /// Set the action.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the data URI.
    pub fn with_data(mut self, data: impl Into<DataUri>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Attach locally built extras.
    pub fn with_extras(self, extras: Bundle) -> Self {
        self.with_parcel(Parcel::from_bundle(extras))
    }

    /// Attach extras as a parcel.
    pub fn with_parcel(mut self, parcel: Parcel) -> Self {
        self.extras = Some(parcel);
        self
    }

    /// The extras parcel, undecoded.
    pub fn parcel(&self) -> Option<&Parcel> {
        self.extras.as_ref()
    }

    fn unparcel(&self) -> Result<Option<&Bundle>> {
        self.extras.as_ref().map(Parcel::unparcel).transpose()
    }
}

impl RawIntent for Intent {
    fn has_extra(&self, name: &str) -> Result<bool> {
        Ok(self
            .unparcel()?
            .is_some_and(|extras| extras.contains_key(name)))
    }

    fn extras(&self) -> Result<Option<Bundle>> {
        Ok(self.unparcel()?.cloned())
    }

    fn bool_extra(&self, name: &str, default: bool) -> Result<bool> {
        Ok(self
            .unparcel()?
            .map_or(default, |extras| extras.get_bool(name, default)))
    }

    fn int_extra(&self, name: &str, default: i32) -> Result<i32> {
        Ok(self
            .unparcel()?
            .map_or(default, |extras| extras.get_int(name, default)))
    }

    fn string_extra(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .unparcel()?
            .and_then(|extras| extras.get_string(name))
            .map(str::to_string))
    }

    fn bundle_extra(&self, name: &str) -> Result<Option<Bundle>> {
        Ok(self
            .unparcel()?
            .and_then(|extras| extras.get_bundle(name))
            .cloned())
    }

    fn action(&self) -> Result<Option<String>> {
        Ok(self.action.clone())
    }

    fn data_string(&self) -> Result<Option<String>> {
        Ok(self.data.as_ref().map(DataUri::to_string))
    }

    fn string_list_extra(&self, name: &str) -> Result<Option<Vec<String>>> {
        Ok(self
            .unparcel()?
            .and_then(|extras| extras.get_string_list(name))
            .map(<[String]>::to_vec))
    }

    fn data(&self) -> Result<Option<DataUri>> {
        Ok(self.data.clone())
    }

    fn set_data(&mut self, data: Option<DataUri>) {
        self.data = data;
    }
}
