//! Error types for intent field access.

use thiserror::Error;

/// Result type alias for raw intent reads.
pub type Result<T> = std::result::Result<T, AccessError>;

/// Failure raised while reading a field from an intent.
///
/// There are exactly two kinds. Guards treat them differently when logging:
/// resource exhaustion is reported without detail, runtime faults carry the
/// error itself as the cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The payload needed more memory than the receiver will spend on it.
    ///
    /// Usually an oversized or entry-flooded parcel.
    #[error("resource exhausted: {requested} exceeds limit of {limit}")]
    ResourceExhausted {
        /// Amount the payload asked for (bytes or entries)
        requested: usize,
        /// Maximum the receiver accepts
        limit: usize,
    },

    /// Malformed payload, corrupt structure or a faulting delegate.
    #[error("runtime fault: {0}")]
    Runtime(String),
}

impl AccessError {
    /// Shorthand for a [`AccessError::Runtime`] fault.
    pub fn runtime(reason: impl Into<String>) -> Self {
        Self::Runtime(reason.into())
    }

    /// Returns true for [`AccessError::ResourceExhausted`].
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, Self::ResourceExhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let oom = AccessError::ResourceExhausted {
            requested: 2048,
            limit: 1024,
        };
        assert_eq!(
            oom.to_string(),
            "resource exhausted: 2048 exceeds limit of 1024"
        );
        assert!(oom.is_resource_exhausted());

        let fault = AccessError::runtime("bad parcel");
        assert_eq!(fault.to_string(), "runtime fault: bad parcel");
        assert!(!fault.is_resource_exhausted());
    }
}
