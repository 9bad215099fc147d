//! Reading prior artifacts and writing new ones.
//!
//! A missing or corrupt prior artifact is not an error: the run proceeds
//! from an empty baseline. Failing to write is fatal.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::EventsError;
use crate::types::EventCollection;

#[derive(Deserialize)]
struct PriorArtifact {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Load the `items` of a previously written artifact.
///
/// Returns an empty `Vec` if the file does not exist, cannot be read, or is
/// not a JSON artifact; the latter two are logged at `warn`. Individual items
/// that no longer deserialize are skipped with a `warn` and the rest are kept.
pub fn load_existing<E: DeserializeOwned>(path: &Path) -> Vec<E> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no prior artifact; starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read prior artifact; starting empty"
            );
            return Vec::new();
        }
    };

    let artifact = match serde_json::from_str::<PriorArtifact>(&content) {
        Ok(artifact) => artifact,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "prior artifact is corrupt; starting empty"
            );
            return Vec::new();
        }
    };

    artifact
        .items
        .into_iter()
        .filter_map(|raw| {
            let event_id = raw
                .get("event_id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("")
                .to_string();
            match serde_json::from_value::<E>(raw) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        event_id = %event_id,
                        error = %e,
                        "skipping unreadable prior event"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Write an artifact as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns [`EventsError::StateWrite`] on I/O failure or
/// [`EventsError::Serialize`] if the collection cannot be encoded.
pub fn write_collection<E: Serialize>(
    path: &Path,
    collection: &EventCollection<E>,
) -> Result<(), EventsError> {
    let write_err = |source: std::io::Error| EventsError::StateWrite {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let json = serde_json::to_string_pretty(collection)?;
    std::fs::write(path, json).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use mdigest_core::NewsEvent;

    use super::*;

    #[test]
    fn missing_file_is_empty_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let items: Vec<NewsEvent> = load_existing(&dir.path().join("events_news.json"));
        assert!(items.is_empty());
    }

    #[test]
    fn corrupt_file_is_empty_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events_news.json");
        std::fs::write(&path, "{ this is not json").unwrap();
        let items: Vec<NewsEvent> = load_existing(&path);
        assert!(items.is_empty());
    }

    #[test]
    fn unreadable_item_is_skipped_and_others_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events_news.json");
        let raw = r#"{
            "generated_at": "2024-03-10T12:00:00.000Z",
            "items": [
                { "event_id": "NEWS_a", "date": "2024-03-09", "category": "NEWS",
                  "severity": "MID", "species": ["BEEF"], "title": "Hanwoo auction",
                  "url": "https://news.example.com/a", "published_at": "" },
                { "event_id": "NEWS_b", "date": "2024-03-09", "category": "NEWS",
                  "severity": "MID", "species": ["HANWOO"], "title": "Free-form tag",
                  "url": "https://news.example.com/b", "published_at": "" },
                { "event_id": "NEWS_c", "date": "2024-03-08", "category": "NEWS",
                  "severity": "EXTREME", "title": "Unknown severity",
                  "url": "https://news.example.com/c", "published_at": "" }
            ]
        }"#;
        std::fs::write(&path, raw).unwrap();

        let items: Vec<NewsEvent> = load_existing(&path);
        let ids: Vec<&str> = items.iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(ids, vec!["NEWS_a"]);
    }

    #[test]
    fn artifact_without_items_is_empty_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events_news.json");
        std::fs::write(&path, r#"{"generated_at": ""}"#).unwrap();
        let items: Vec<NewsEvent> = load_existing(&path);
        assert!(items.is_empty());
    }

    #[test]
    fn write_then_load_keeps_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events_news.json");
        let collection = EventCollection {
            generated_at: "2024-03-10T12:00:00.000Z".to_string(),
            items: vec![NewsEvent {
                event_id: "NEWS_c4ed1c218d".to_string(),
                date: "2024-03-09".to_string(),
                category: mdigest_core::Category::News,
                severity: mdigest_core::Severity::Mid,
                species: std::collections::BTreeSet::new(),
                tags: vec!["price".to_string()],
                title: "Egg prices".to_string(),
                publisher: String::new(),
                url: "https://example.com/a".to_string(),
                published_at: String::new(),
            }],
            sources: Vec::new(),
            disclaimer: Some(crate::NEWS_DISCLAIMER.to_string()),
        };

        write_collection(&path, &collection).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"_sources\""));
        assert!(raw.contains("\"disclaimer\""));

        let items: Vec<NewsEvent> = load_existing(&path);
        assert_eq!(items, collection.items);
    }
}
