use std::path::PathBuf;

/// Explicit run configuration passed into the pipeline entry point.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Feed source definitions (JSON or YAML).
    pub sources_path: PathBuf,
    /// Directory holding `events_official.json` and `events_news.json`.
    pub events_dir: PathBuf,
    pub log_level: String,
    pub user_agent: String,
    pub fetch_timeout_secs: u64,
    pub max_concurrent_feeds: usize,
}

impl RunConfig {
    #[must_use]
    pub fn official_output_path(&self) -> PathBuf {
        self.events_dir.join("events_official.json")
    }

    #[must_use]
    pub fn news_output_path(&self) -> PathBuf {
        self.events_dir.join("events_news.json")
    }
}
