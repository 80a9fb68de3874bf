use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version string written into new manifests
pub const MANIFEST_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Persisted sprite order of one atlas.
///
/// Keeps numeric frame and tile ids stable between builds: known keys keep
/// their relative order, new keys are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: String,
    pub sprite_order: Vec<String>,
    pub metadata: ManifestMetadata,
}

impl Manifest {
    /// Build the manifest to write after a run.
    ///
    /// The creation time carries over from `previous` when there is one.
    pub fn from_order(sprite_order: Vec<String>, previous: Option<&Manifest>) -> Self {
        let now = Utc::now();
        let created = previous.map_or(now, |m| m.metadata.created);

        Self {
            version: MANIFEST_VERSION.to_string(),
            sprite_order,
            metadata: ManifestMetadata {
                created,
                modified: now,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let manifest = Manifest::from_order(vec!["a".to_string(), "b".to_string()], None);
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["version"], "1.0");
        assert_eq!(value["spriteOrder"], serde_json::json!(["a", "b"]));
        assert!(value["metadata"]["created"].is_string());
        assert!(value["metadata"]["modified"].is_string());
    }

    #[test]
    fn test_parses_iso_timestamps() {
        let json = r#"{
            "version": "1.0",
            "spriteOrder": ["hero/idle", "hero/walk"],
            "metadata": {
                "created": "2024-03-01T10:00:00.000Z",
                "modified": "2024-03-02T12:30:00Z"
            }
        }"#;

        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.sprite_order, vec!["hero/idle", "hero/walk"]);
        assert!(manifest.metadata.created < manifest.metadata.modified);
    }

    #[test]
    fn test_from_order_keeps_creation_time() {
        let first = Manifest::from_order(vec!["a".to_string()], None);
        let second = Manifest::from_order(vec!["a".to_string(), "b".to_string()], Some(&first));

        assert_eq!(second.metadata.created, first.metadata.created);
        assert!(second.metadata.modified >= first.metadata.modified);
    }
}
