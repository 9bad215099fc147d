//! Event pipeline for livestock market disruption feeds.
//!
//! Fetches official bulletin and news RSS/Atom feeds, extracts title + link
//! items, classifies them with keyword rules, assigns content-addressed ids,
//! and merges them into the previously persisted collection under a rolling
//! retention window. Per-feed failures are reported in `_sources` and never
//! abort the run.

pub mod classify;
pub mod dates;
pub mod error;
pub mod event_id;
pub mod fetch;
pub mod merge;
pub mod parse;
pub mod pipeline;
pub mod status;
pub mod store;
pub mod types;

pub use classify::Classifier;
pub use error::EventsError;
pub use event_id::event_id;
pub use fetch::{FeedFetcher, FetchedFeed};
pub use merge::{merge_and_retain, PersistedEvent};
pub use parse::{parse_feed, FeedItem};
pub use pipeline::{run_event_pipeline, PriorState};
pub use status::SourceStatus;
pub use types::{EventCollection, PipelineOutput, NEWS_DISCLAIMER};
