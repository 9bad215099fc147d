//! Per-feed run outcome as it appears in an artifact's `_sources` list.

use mdigest_core::FeedSource;
use serde::{Deserialize, Serialize};

use crate::error::EventsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub id: String,
    pub name: String,
    pub url: String,
    pub ok: bool,
    /// Items parsed from the feed after the per-feed cap, before classification.
    pub count: usize,
    /// HTTP status code, when the server answered.
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl SourceStatus {
    #[must_use]
    pub fn succeeded(feed: &FeedSource, count: usize, http_status: u16) -> Self {
        Self {
            id: feed.id.clone(),
            name: feed.name.clone(),
            url: feed.url.clone(),
            ok: true,
            count,
            status: Some(http_status),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(feed: &FeedSource, error: &EventsError) -> Self {
        Self {
            id: feed.id.clone(),
            name: feed.name.clone(),
            url: feed.url.clone(),
            ok: false,
            count: 0,
            status: error.http_status(),
            error: Some(error.to_string()),
        }
    }
}
