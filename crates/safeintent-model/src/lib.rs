//! # SafeIntent Model
//!
//! Data types for intents delivered by other applications: the action string,
//! the data URI and the heterogeneous extras bundle.
//!
//! ## Threat Model
//!
//! An intent arrives from a process we do not control. Its extras travel as a
//! serialized parcel that is only decoded when a field is first read, so a
//! hostile sender can make any extras read fail:
//!
//! | Threat | Surface | Failure |
//! |--------|---------|---------|
//! | Oversized parcel | Extras decode | [`AccessError::ResourceExhausted`] |
//! | Entry flood | Extras decode | [`AccessError::ResourceExhausted`] |
//! | Corrupt parcel | Extras decode | [`AccessError::Runtime`] |
//! | Type confusion | Typed extras read | Default value (logged) |
//!
//! ## Components
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Intent`] | The wrapped message and its builder |
//! | [`RawIntent`] | Fallible read interface that guards delegate to |
//! | [`Bundle`] | Named extras with lenient typed reads |
//! | [`ExtraValue`] | Tagged extras variant |
//! | [`Parcel`] | Lazily decoded extras bytes |
//! | [`DataUri`] | Lenient URI that never fails to parse |
//!
//! ## Example
//!
//! ```rust
//! use safeintent_model::{Bundle, DataUri, Intent, RawIntent};
//!
//! let mut extras = Bundle::new();
//! extras.put("private_tab", true);
//!
//! let intent = Intent::new()
//!     .with_action("android.intent.action.VIEW")
//!     .with_data(DataUri::parse("https://example.com/page"))
//!     .with_extras(extras);
//!
//! assert!(intent.bool_extra("private_tab", false)?);
//! assert_eq!(intent.int_extra("missing", 42)?, 42);
//! # Ok::<(), safeintent_model::AccessError>(())
//! ```

mod bundle;
mod error;
mod intent;
mod parcel;
mod uri;
mod value;

pub use bundle::Bundle;
pub use error::{AccessError, Result};
pub use intent::{Intent, IntentPayload, RawIntent};
pub use parcel::{Parcel, ParcelLimits, DEFAULT_MAX_PARCEL_BYTES, DEFAULT_MAX_PARCEL_ENTRIES};
pub use uri::DataUri;
pub use value::ExtraValue;
