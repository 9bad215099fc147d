use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::events::{Severity, Species};
use crate::keywords::KeywordTable;
use crate::ConfigError;

/// One configured feed. Official and news lists share this shape; fields
/// that only apply to one list are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Official feeds only: free-text subcategory copied onto each event.
    #[serde(default)]
    pub category: Option<String>,
    /// Official feeds only: severity used when no keyword matches.
    #[serde(default)]
    pub severity_default: Option<Severity>,
    /// News feeds only: when non-empty, replaces title-derived species.
    #[serde(default)]
    pub species_tags: Vec<Species>,
    /// News feeds only: copied onto each event.
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub max_items_per_feed: usize,
    pub days_keep: u32,
    pub default_news_severity: Severity,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_items_per_feed: 30,
            days_keep: 45,
            default_news_severity: Severity::Mid,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesFile {
    #[serde(default)]
    pub rules: Rules,
    #[serde(default)]
    pub official_rss: Vec<FeedSource>,
    #[serde(default)]
    pub news_rss: Vec<FeedSource>,
    #[serde(default)]
    pub keywords: KeywordTable,
}

/// Load and validate the feed sources file.
///
/// `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let parse_err = |reason: String| ConfigError::SourcesFileParse {
        path: path.display().to_string(),
        reason,
    };

    let sources: SourcesFile = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| parse_err(e.to_string()))?
    } else {
        serde_json::from_str(&content).map_err(|e| parse_err(e.to_string()))?
    };

    validate_sources(&sources)?;

    Ok(sources)
}

fn validate_sources(sources: &SourcesFile) -> Result<(), ConfigError> {
    if sources.rules.max_items_per_feed == 0 {
        return Err(ConfigError::Validation(
            "rules.max_items_per_feed must be at least 1".to_string(),
        ));
    }
    if sources.rules.days_keep == 0 {
        return Err(ConfigError::Validation(
            "rules.days_keep must be at least 1".to_string(),
        ));
    }

    validate_feed_list("official_rss", &sources.official_rss)?;
    validate_feed_list("news_rss", &sources.news_rss)
}

fn validate_feed_list(list: &str, feeds: &[FeedSource]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for feed in feeds {
        if feed.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{list}: feed id must be non-empty"
            )));
        }
        if feed.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{list}: feed '{}' has an empty name",
                feed.id
            )));
        }
        if feed.url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{list}: feed '{}' has an empty url",
                feed.id
            )));
        }
        if !seen_ids.insert(feed.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "{list}: duplicate feed id '{}'",
                feed.id
            )));
        }
    }

    Ok(())
}
