//! Loading intent payloads from disk.

use std::fs;
use std::path::Path;

use safeintent_model::{Intent, ParcelLimits};

use crate::Result;

/// Read a JSON intent payload. Only the envelope is validated; extras are
/// decoded under `limits` when first read.
pub fn load_intent(path: impl AsRef<Path>, limits: ParcelLimits) -> Result<Intent> {
    let bytes = fs::read(path.as_ref())?;
    Ok(Intent::from_json(&bytes, limits)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SafeIntentError;
    use safeintent_model::RawIntent;
    use tempfile::TempDir;

    #[test]
    fn test_load_intent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("intent.json");
        fs::write(
            &path,
            r#"{"action": "android.intent.action.VIEW", "extras": {"x": {"type": "bad"}}}"#,
        )
        .unwrap();

        let intent = load_intent(&path, ParcelLimits::default()).unwrap();
        assert_eq!(
            intent.action().unwrap().as_deref(),
            Some("android.intent.action.VIEW")
        );
        assert!(intent.has_extra("x").is_err());
    }

    #[test]
    fn test_load_intent_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_intent(&path, ParcelLimits::default()),
            Err(SafeIntentError::Payload(_))
        ));
        assert!(matches!(
            load_intent(temp_dir.path().join("missing.json"), ParcelLimits::default()),
            Err(SafeIntentError::Io(_))
        ));
    }
}
