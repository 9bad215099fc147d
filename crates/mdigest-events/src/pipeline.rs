//! Event pipeline orchestration.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use mdigest_core::{
    Category, FeedSource, NewsEvent, OfficialEvent, Severity, SourcesFile, Species,
};

use crate::classify::Classifier;
use crate::dates::{parse_feed_date, to_iso, to_ymd};
use crate::event_id::event_id;
use crate::fetch::FeedFetcher;
use crate::merge::merge_and_retain;
use crate::parse::{parse_feed, FeedItem};
use crate::status::SourceStatus;
use crate::types::{EventCollection, PipelineOutput, NEWS_DISCLAIMER};

/// Events persisted by the previous run, one list per category.
#[derive(Debug, Clone, Default)]
pub struct PriorState {
    pub official: Vec<OfficialEvent>,
    pub news: Vec<NewsEvent>,
}

/// What one feed contributed to a run. Failures are values here, not errors.
struct FeedOutcome<E> {
    status: SourceStatus,
    events: Vec<E>,
}

/// Run the full pipeline once.
///
/// 1. Fetch, parse, cap and classify every official and news feed,
///    at most `max_concurrent` feeds at a time per category.
/// 2. Merge each category's fresh events into its prior events, dedup by id,
///    and apply the `rules.days_keep` retention window relative to `now`.
/// 3. Attach one `SourceStatus` per configured feed, in config order.
///
/// Never fails: a feed that cannot be fetched is recorded as `ok: false` and
/// contributes no events, and the prior events of its category are kept.
pub async fn run_event_pipeline(
    fetcher: &FeedFetcher,
    sources: &SourcesFile,
    prior: PriorState,
    now: DateTime<Utc>,
    max_concurrent: usize,
) -> PipelineOutput {
    let classifier = Classifier::new(&sources.keywords);
    let classifier = &classifier;
    let max_items = sources.rules.max_items_per_feed;
    let days_keep = sources.rules.days_keep;
    let news_severity = sources.rules.default_news_severity;
    let max_concurrent = max_concurrent.max(1);

    let official = stream::iter(&sources.official_rss)
        .map(|feed| {
            process_feed(fetcher, feed, max_items, move |item| {
                build_official_event(classifier, feed, item, now)
            })
        })
        .buffered(max_concurrent)
        .collect::<Vec<FeedOutcome<OfficialEvent>>>();

    let news = stream::iter(&sources.news_rss)
        .map(|feed| {
            process_feed(fetcher, feed, max_items, move |item| {
                build_news_event(classifier, feed, item, news_severity, now)
            })
        })
        .buffered(max_concurrent)
        .collect::<Vec<FeedOutcome<NewsEvent>>>();

    let (official_outcomes, news_outcomes) = futures::join!(official, news);

    let (fresh_official, official_sources) = flatten_outcomes(official_outcomes);
    let (fresh_news, news_sources) = flatten_outcomes(news_outcomes);

    let official_items = merge_and_retain(prior.official, fresh_official, now, days_keep);
    let news_items = merge_and_retain(prior.news, fresh_news, now, days_keep);

    tracing::info!(
        official = official_items.len(),
        news = news_items.len(),
        official_failed = official_sources.iter().filter(|s| !s.ok).count(),
        news_failed = news_sources.iter().filter(|s| !s.ok).count(),
        "event pipeline merged"
    );

    let generated_at = to_iso(now);
    PipelineOutput {
        official: EventCollection {
            generated_at: generated_at.clone(),
            items: official_items,
            sources: official_sources,
            disclaimer: None,
        },
        news: EventCollection {
            generated_at,
            items: news_items,
            sources: news_sources,
            disclaimer: Some(NEWS_DISCLAIMER.to_string()),
        },
    }
}

async fn process_feed<E, F>(
    fetcher: &FeedFetcher,
    feed: &FeedSource,
    max_items: usize,
    build: F,
) -> FeedOutcome<E>
where
    F: Fn(&FeedItem) -> E,
{
    match fetcher.fetch_text(&feed.url).await {
        Ok(fetched) => {
            let items: Vec<FeedItem> = parse_feed(&fetched.body).take(max_items).collect();
            if items.is_empty() {
                tracing::debug!(feed = %feed.id, "feed matched neither RSS nor Atom shape");
            } else {
                tracing::debug!(feed = %feed.id, count = items.len(), "parsed feed items");
            }
            FeedOutcome {
                status: SourceStatus::succeeded(feed, items.len(), fetched.status),
                events: items.iter().map(build).collect(),
            }
        }
        Err(e) => {
            tracing::warn!(feed = %feed.id, url = %feed.url, error = %e, "feed fetch failed");
            FeedOutcome {
                status: SourceStatus::failed(feed, &e),
                events: Vec::new(),
            }
        }
    }
}

fn flatten_outcomes<E>(outcomes: Vec<FeedOutcome<E>>) -> (Vec<E>, Vec<SourceStatus>) {
    let mut events = Vec::new();
    let mut statuses = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        events.extend(outcome.events);
        statuses.push(outcome.status);
    }
    (events, statuses)
}

/// `(date, published_at)` for an item: the feed date when it parses,
/// otherwise the run date with an empty `published_at`.
fn item_dates(item: &FeedItem, now: DateTime<Utc>) -> (String, String) {
    match parse_feed_date(&item.published_raw) {
        Some(ts) => (to_ymd(ts), to_iso(ts)),
        None => (to_ymd(now), String::new()),
    }
}

fn build_official_event(
    classifier: &Classifier,
    feed: &FeedSource,
    item: &FeedItem,
    now: DateTime<Utc>,
) -> OfficialEvent {
    let (date, published_at) = item_dates(item, now);
    OfficialEvent {
        event_id: event_id(Category::Official, &item.link),
        date,
        category: Category::Official,
        subcategory: feed.category.clone().unwrap_or_default(),
        severity: classifier.severity(&item.title, feed.severity_default.unwrap_or_default()),
        species: classifier.species(&item.title),
        region: "KR".to_string(),
        template_id: classifier.template_id(&item.title),
        title: item.title.clone(),
        source_title: feed.name.clone(),
        source_url: item.link.clone(),
        published_at,
    }
}

fn build_news_event(
    classifier: &Classifier,
    feed: &FeedSource,
    item: &FeedItem,
    default_severity: Severity,
    now: DateTime<Utc>,
) -> NewsEvent {
    let (date, published_at) = item_dates(item, now);
    let species: BTreeSet<Species> = if feed.species_tags.is_empty() {
        classifier.species(&item.title)
    } else {
        feed.species_tags.iter().copied().collect()
    };

    NewsEvent {
        event_id: event_id(Category::News, &item.link),
        date,
        category: Category::News,
        severity: classifier.severity(&item.title, default_severity),
        species,
        tags: feed.tags.clone(),
        title: item.title.clone(),
        publisher: String::new(),
        url: item.link.clone(),
        published_at,
    }
}
