use mdigest_core::{NewsEvent, OfficialEvent};
use serde::{Deserialize, Serialize};

use crate::status::SourceStatus;

/// Attached to the news artifact: titles and links only, never article text.
pub const NEWS_DISCLAIMER: &str =
    "민간 뉴스는 제목/링크만 제공합니다. 본문 요약·발췌는 하지 않습니다.";

/// One category's persisted output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCollection<E> {
    pub generated_at: String,
    /// Sorted newest first, unique by `event_id`, retention-filtered.
    pub items: Vec<E>,
    #[serde(rename = "_sources", default)]
    pub sources: Vec<SourceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

/// Result of one pipeline run, ready to be written.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub official: EventCollection<OfficialEvent>,
    pub news: EventCollection<NewsEvent>,
}
