//! Persisted event records, partitioned by category.
//!
//! Official and news events are distinct types so that each category's
//! output shape is fixed at compile time. News events have no field that
//! could hold article body text.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Official,
    News,
}

impl Category {
    /// Prefix used when deriving content-addressed event ids.
    #[must_use]
    pub fn id_prefix(self) -> &'static str {
        match self {
            Category::Official => "OFF",
            Category::News => "NEWS",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    #[default]
    Mid,
    High,
}

/// Species tag. Declaration order is the serialization order inside a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Species {
    Beef,
    Pork,
    Poultry,
    Duck,
    Egg,
}

#[cfg(test)]
impl Species {
    pub const ALL: [Species; 5] = [
        Species::Beef,
        Species::Pork,
        Species::Poultry,
        Species::Duck,
        Species::Egg,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateId {
    OfficialDiseaseUpdate,
    OfficialNotice,
}

fn official_category() -> Category {
    Category::Official
}

fn news_category() -> Category {
    Category::News
}

fn default_region() -> String {
    "KR".to_string()
}

/// An item from a government or official bulletin feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialEvent {
    pub event_id: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default = "official_category")]
    pub category: Category,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub species: BTreeSet<Species>,
    #[serde(default = "default_region")]
    pub region: String,
    pub template_id: TemplateId,
    pub title: String,
    #[serde(default)]
    pub source_title: String,
    pub source_url: String,
    /// RFC 3339 timestamp, or empty when the feed date was missing or unparsable.
    #[serde(default)]
    pub published_at: String,
}

/// A title + link mention from a general news feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub event_id: String,
    pub date: String,
    #[serde(default = "news_category")]
    pub category: Category,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub species: BTreeSet<Species>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    pub url: String,
    #[serde(default)]
    pub published_at: String,
}
