//! Handlers for the `events` and `check-sources` subcommands.
//!
//! A feed failing mid-run is not an error here: the pipeline records it in
//! the artifact's `_sources` list. Only configuration problems and write
//! failures abort the command.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use mdigest_core::{load_sources, RunConfig, SourcesFile};
use mdigest_events::store::{load_existing, write_collection};
use mdigest_events::{run_event_pipeline, FeedFetcher, PipelineOutput, PriorState};

/// Counts reported at the end of an `events` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) official: usize,
    pub(crate) news: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "official: {}, news: {}", self.official, self.news)
    }
}

fn load_sources_for(
    config: &RunConfig,
    sources_override: Option<&Path>,
) -> anyhow::Result<SourcesFile> {
    let path = sources_override.unwrap_or(&config.sources_path);
    load_sources(path)
        .with_context(|| format!("failed to load sources from {}", path.display()))
}

/// Run the event pipeline once and, unless `dry_run`, rewrite both artifacts.
pub(crate) async fn run_events(
    config: &RunConfig,
    sources_override: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let summary = collect_events(config, sources_override, dry_run).await?;
    tracing::info!(
        official = summary.official,
        news = summary.news,
        dry_run,
        "event run complete"
    );
    println!("{summary}");
    Ok(())
}

pub(crate) async fn collect_events(
    config: &RunConfig,
    sources_override: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<RunSummary> {
    let sources = load_sources_for(config, sources_override)?;
    let fetcher = FeedFetcher::new(config.fetch_timeout_secs, &config.user_agent)
        .context("failed to build HTTP client")?;

    let official_path = config.official_output_path();
    let news_path = config.news_output_path();
    let prior = PriorState {
        official: load_existing(&official_path),
        news: load_existing(&news_path),
    };

    let PipelineOutput { official, news } = run_event_pipeline(
        &fetcher,
        &sources,
        prior,
        Utc::now(),
        config.max_concurrent_feeds,
    )
    .await;

    let summary = RunSummary {
        official: official.items.len(),
        news: news.items.len(),
    };

    if dry_run {
        tracing::info!("dry run; artifacts not written");
        return Ok(summary);
    }

    write_collection(&official_path, &official)
        .with_context(|| format!("failed to write {}", official_path.display()))?;
    write_collection(&news_path, &news)
        .with_context(|| format!("failed to write {}", news_path.display()))?;

    Ok(summary)
}

/// Validate the sources file and print how many feeds it declares.
pub(crate) fn check_sources(
    config: &RunConfig,
    sources_override: Option<&Path>,
) -> anyhow::Result<()> {
    let sources = load_sources_for(config, sources_override)?;
    tracing::info!(
        official_feeds = sources.official_rss.len(),
        news_feeds = sources.news_rss.len(),
        "sources file is valid"
    );
    println!(
        "official feeds: {}, news feeds: {}",
        sources.official_rss.len(),
        sources.news_rss.len()
    );
    Ok(())
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
