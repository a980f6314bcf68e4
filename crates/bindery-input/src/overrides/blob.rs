//! The persisted override blob: `{"version": 1, "overrides": [...]}`.

use bindery_common::{ActionId, BindingId, StoreError};
use serde::{Deserialize, Serialize};

pub const BLOB_VERSION: u32 = 1;

/// One persisted override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    /// Qualified action name (`"Map/Action"`), used when the id no longer resolves.
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<ActionId>,
    pub binding_id: BindingId,
    /// Override path. Empty means the binding was explicitly unbound.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideBlob {
    pub version: u32,
    #[serde(default)]
    pub overrides: Vec<OverrideRecord>,
}

impl OverrideBlob {
    pub fn new(overrides: Vec<OverrideRecord>) -> Self {
        Self {
            version: BLOB_VERSION,
            overrides,
        }
    }

    pub fn encode(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(|e| StoreError::Encode(e.to_string()))
    }

    /// Decode and check the version.
    pub fn decode(blob: &str) -> Result<Self, StoreError> {
        let decoded: Self =
            serde_json::from_str(blob).map_err(|e| StoreError::Decode(e.to_string()))?;
        if decoded.version != BLOB_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: decoded.version,
                expected: BLOB_VERSION,
            });
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_records_without_action_id() {
        let blob = r#"{"version":1,"overrides":[{"action":"Player/Jump","binding_id":"b1","path":"<Keyboard>/j"}]}"#;
        let decoded = OverrideBlob::decode(blob).unwrap();
        assert_eq!(decoded.overrides.len(), 1);
        assert_eq!(decoded.overrides[0].action_id, None);
        assert_eq!(decoded.overrides[0].binding_id.as_str(), "b1");
    }

    #[test]
    fn decode_rejects_future_version() {
        let err = OverrideBlob::decode(r#"{"version":2,"overrides":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedVersion {
                found: 2,
                expected: 1
            }
        ));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = OverrideBlob::decode("[{").unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
