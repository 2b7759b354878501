//! Model catalog entries.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// A model exposed by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    /// Unique model identifier, e.g. `openai/gpt-4.1`.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Categorization tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// When the model was added, as reported by the service.
    pub created_at: String,
    /// When the model was last updated, as reported by the service.
    pub updated_at: String,
    /// Owning user or organization.
    pub owner: String,
}

impl Model {
    /// Parses `created_at`, returning `None` when it is empty or malformed.
    pub fn created_at_timestamp(&self) -> Option<Timestamp> {
        self.created_at.parse().ok()
    }

    /// Parses `updated_at`, returning `None` when it is empty or malformed.
    pub fn updated_at_timestamp(&self) -> Option<Timestamp> {
        self.updated_at.parse().ok()
    }

    /// Returns whether the model carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_entry_decodes() {
        let models: Vec<Model> =
            serde_json::from_str(r#"[{"id":"openai/gpt-4.1","description":"x"}]"#).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "openai/gpt-4.1");
        assert_eq!(models[0].description, "x");
        assert!(models[0].tags.is_empty());
        assert!(models[0].created_at_timestamp().is_none());
    }

    #[test]
    fn test_full_entry_decodes() {
        let body = r#"{
            "id": "meta/llama-3",
            "name": "Llama 3",
            "description": "open weights",
            "tags": ["chat", "multilingual"],
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "not a date",
            "owner": "meta"
        }"#;

        let model: Model = serde_json::from_str(body).unwrap();
        assert_eq!(model.owner, "meta");
        assert!(model.has_tag("chat"));
        assert!(!model.has_tag("vision"));
        assert_eq!(
            model.created_at_timestamp().map(|ts| ts.as_second()),
            Some(1_714_564_800)
        );
        assert!(model.updated_at_timestamp().is_none());
    }

    #[test]
    fn test_null_tags_decode_as_empty() {
        let model: Model = serde_json::from_str(r#"{"id":"a","tags":null}"#).unwrap();
        assert!(model.tags.is_empty());
    }
}
