//! # Lazily Decoded Extras
//!
//! Extras from another process arrive as serialized bytes. Nothing is decoded
//! until the first field read, which is where a hostile payload gets its
//! chance to fail: an oversized or entry-flooded parcel exhausts resources,
//! a corrupt one faults at runtime.
//!
//! ## Security Notes
//!
//! - Size is checked before decoding, entry count right after
//! - A failed decode is not cached; every read fails the same way
//! - A successful decode is cached for the parcel's lifetime

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::bundle::Bundle;
use crate::error::{AccessError, Result};

/// Default maximum parcel size (1 MiB, the usual binder transaction budget).
pub const DEFAULT_MAX_PARCEL_BYTES: usize = 1024 * 1024;

/// Default maximum number of entries, nested bundles included.
pub const DEFAULT_MAX_PARCEL_ENTRIES: usize = 4096;

/// Resource limits applied when a parcel is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParcelLimits {
    /// Maximum raw size in bytes.
    pub max_bytes: usize,
    /// Maximum number of decoded entries, counted recursively.
    pub max_entries: usize,
}

impl Default for ParcelLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_PARCEL_BYTES,
            max_entries: DEFAULT_MAX_PARCEL_ENTRIES,
        }
    }
}

/// Serialized extras that decode into a [`Bundle`] on first access.
#[derive(Debug, Clone)]
pub struct Parcel {
    raw: Option<Vec<u8>>,
    limits: ParcelLimits,
    decoded: OnceLock<Bundle>,
}

impl Parcel {
    /// Wrap raw bytes received from another process.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, limits: ParcelLimits) -> Self {
        Self {
            raw: Some(bytes.into()),
            limits,
            decoded: OnceLock::new(),
        }
    }

    /// Wrap a bundle built locally. It is already decoded.
    pub fn from_bundle(bundle: Bundle) -> Self {
        let decoded = OnceLock::new();
        let _ = decoded.set(bundle);
        Self {
            raw: None,
            limits: ParcelLimits::default(),
            decoded,
        }
    }

    /// Size of the raw bytes, zero for locally built parcels.
    pub fn raw_len(&self) -> usize {
        self.raw.as_ref().map_or(0, Vec::len)
    }

    /// Limits this parcel decodes under.
    pub fn limits(&self) -> ParcelLimits {
        self.limits
    }

    /// Returns true once the extras have been decoded successfully.
    pub fn is_decoded(&self) -> bool {
        self.decoded.get().is_some()
    }

    /// Decode the extras, or return the cached result of an earlier decode.
    ///
    /// # Errors
    ///
    /// - [`AccessError::ResourceExhausted`] if the raw bytes or the decoded
    ///   entry count exceed the limits
    /// - [`AccessError::Runtime`] if the bytes are not a valid bundle
    pub fn unparcel(&self) -> Result<&Bundle> {
        if let Some(bundle) = self.decoded.get() {
            return Ok(bundle);
        }

        let Some(raw) = &self.raw else {
            return Ok(self.decoded.get_or_init(Bundle::new));
        };

        if raw.len() > self.limits.max_bytes {
            return Err(AccessError::ResourceExhausted {
                requested: raw.len(),
                limit: self.limits.max_bytes,
            });
        }

        let bundle: Bundle = serde_json::from_slice(raw)
            .map_err(|e| AccessError::runtime(format!("malformed parcel: {e}")))?;

        let entries = bundle.entry_count();
        if entries > self.limits.max_entries {
            return Err(AccessError::ResourceExhausted {
                requested: entries,
                limit: self.limits.max_entries,
            });
        }

        Ok(self.decoded.get_or_init(|| bundle))
    }
}

impl From<Bundle> for Parcel {
    fn from(bundle: Bundle) -> Self {
        Self::from_bundle(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_on_first_access() {
        let parcel = Parcel::from_bytes(
            br#"{"count": {"type": "int", "value": 3}}"#.to_vec(),
            ParcelLimits::default(),
        );
        assert!(!parcel.is_decoded());

        let bundle = parcel.unparcel().unwrap();
        assert_eq!(bundle.get_int("count", 0), 3);
        assert!(parcel.is_decoded());
    }

    #[test]
    fn test_corrupt_bytes_fault_every_time() {
        let parcel = Parcel::from_bytes(b"{not json".to_vec(), ParcelLimits::default());

        for _ in 0..2 {
            match parcel.unparcel() {
                Err(AccessError::Runtime(reason)) => assert!(reason.starts_with("malformed parcel")),
                other => panic!("Expected runtime fault, got {:?}", other),
            }
        }
        assert!(!parcel.is_decoded());
    }

    #[test]
    fn test_oversized_parcel_exhausts_resources() {
        let limits = ParcelLimits {
            max_bytes: 16,
            ..ParcelLimits::default()
        };
        let parcel = Parcel::from_bytes(vec![b' '; 17], limits);

        assert_eq!(
            parcel.unparcel().unwrap_err(),
            AccessError::ResourceExhausted {
                requested: 17,
                limit: 16
            }
        );
    }

    #[test]
    fn test_entry_flood_exhausts_resources() {
        let limits = ParcelLimits {
            max_entries: 2,
            ..ParcelLimits::default()
        };
        let raw = br#"{
            "a": {"type": "bool", "value": true},
            "b": {"type": "bundle", "value": {"c": {"type": "int", "value": 1}}}
        }"#;
        let parcel = Parcel::from_bytes(raw.to_vec(), limits);

        assert!(parcel.unparcel().unwrap_err().is_resource_exhausted());
    }

    #[test]
    fn test_local_bundle_is_already_decoded() {
        let parcel = Parcel::from(Bundle::new().with("flag", true));
        assert!(parcel.is_decoded());
        assert_eq!(parcel.raw_len(), 0);
        assert!(parcel.unparcel().unwrap().get_bool("flag", false));
    }

    #[test]
    fn test_limits_deserialize_with_defaults() {
        let limits: ParcelLimits = serde_json::from_str(r#"{"max_bytes": 10}"#).unwrap();
        assert_eq!(limits.max_bytes, 10);
        assert_eq!(limits.max_entries, DEFAULT_MAX_PARCEL_ENTRIES);
    }
}
