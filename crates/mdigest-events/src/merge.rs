//! Merge, dedup and retention over a category's event collection.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use mdigest_core::{NewsEvent, OfficialEvent};

use crate::dates::effective_timestamp;

/// An event that can be merged into a persisted collection.
pub trait PersistedEvent {
    /// Unique key within the category's collection.
    fn event_id(&self) -> &str;

    /// Timestamp used for retention and ordering; `None` when unparsable.
    fn effective_timestamp(&self) -> Option<DateTime<Utc>>;
}

impl PersistedEvent for OfficialEvent {
    fn event_id(&self) -> &str {
        &self.event_id
    }

    fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        effective_timestamp(&self.published_at, &self.date)
    }
}

impl PersistedEvent for NewsEvent {
    fn event_id(&self) -> &str {
        &self.event_id
    }

    fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        effective_timestamp(&self.published_at, &self.date)
    }
}

/// Union `existing` and `fresh`, collapse duplicate ids, drop expired events,
/// and sort newest first.
///
/// 1. Events are keyed by `event_id` in insertion order, `existing` first.
///    A later event with the same id replaces the earlier value but keeps
///    its position, so fresh data wins over persisted data.
/// 2. Events older than `now - days_keep` are dropped; an event exactly at
///    the cutoff is kept. Events whose timestamp cannot be parsed are always
///    kept, as is everything when the window is too large to represent.
/// 3. The result is stable-sorted by timestamp descending, with unparsable
///    timestamps treated as the epoch (last).
///
/// The function is pure: the same inputs and `now` give the same output.
#[must_use]
pub fn merge_and_retain<E: PersistedEvent>(
    existing: Vec<E>,
    fresh: Vec<E>,
    now: DateTime<Utc>,
    days_keep: u32,
) -> Vec<E> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<E> = Vec::with_capacity(existing.len() + fresh.len());

    for event in existing.into_iter().chain(fresh) {
        match positions.get(event.event_id()).copied() {
            Some(pos) => merged[pos] = event,
            None => {
                positions.insert(event.event_id().to_string(), merged.len());
                merged.push(event);
            }
        }
    }

    // A window reaching past the earliest representable instant keeps everything.
    let cutoff = TimeDelta::try_days(i64::from(days_keep))
        .and_then(|window| now.checked_sub_signed(window));
    if let Some(cutoff) = cutoff {
        merged.retain(|event| event.effective_timestamp().is_none_or(|ts| ts >= cutoff));
    }

    merged.sort_by_cached_key(|event| {
        std::cmp::Reverse(
            event
                .effective_timestamp()
                .map_or(0, |ts| ts.timestamp_millis()),
        )
    });

    merged
}
