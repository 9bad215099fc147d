//! Lenient timestamp handling for feed dates and persisted event dates.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a feed or persisted date string into UTC.
///
/// Accepts RFC 2822 (`pubDate`), RFC 3339 (Atom, Dublin Core, persisted
/// `published_at`), naive date-times and bare `YYYY-MM-DD`. Naive values are
/// taken as UTC. Returns `None` for empty or unrecognized text.
#[must_use]
pub fn parse_feed_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(dt) = parse_rfc2822_ignoring_weekday(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// RFC 2822, retried without the leading `"<Day>, "` when the weekday does
/// not match the date.
fn parse_rfc2822_ignoring_weekday(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw).ok().or_else(|| {
        let (weekday, rest) = raw.split_once(',')?;
        let weekday = weekday.trim();
        if weekday.is_empty() || !weekday.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        DateTime::parse_from_rfc2822(rest.trim()).ok()
    })
}

/// `YYYY-MM-DD` in UTC.
#[must_use]
pub fn to_ymd(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
#[must_use]
pub fn to_iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Timestamp an event sorts and expires by: `published_at`, else `date`.
///
/// An empty `published_at` falls through to `date`. A non-empty but
/// unparsable `published_at` does not.
#[must_use]
pub fn effective_timestamp(published_at: &str, date: &str) -> Option<DateTime<Utc>> {
    if published_at.trim().is_empty() {
        parse_feed_date(date)
    } else {
        parse_feed_date(published_at)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_rfc2822_pub_date() {
        let ts = parse_feed_date("Mon, 04 Mar 2024 09:00:00 +0900").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc2822_with_wrong_weekday() {
        // 2024-03-04 is a Monday.
        let ts = parse_feed_date("Tue, 04 Mar 2024 09:00:00 +0900").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc2822_without_weekday() {
        let ts = parse_feed_date("04 Mar 2024 09:00:00 GMT").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_feed_date("2024-03-03T10:00:00+09:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 3, 1, 0, 0).unwrap());
    }

    #[test]
    fn parses_naive_forms_as_utc() {
        assert_eq!(
            parse_feed_date("2024-03-03 10:00:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 3, 10, 0, 0).unwrap()
        );
        assert_eq!(
            parse_feed_date("2024-03-03").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert!(parse_feed_date("").is_none());
        assert!(parse_feed_date("   ").is_none());
        assert!(parse_feed_date("yesterday-ish").is_none());
    }

    #[test]
    fn iso_uses_millis_and_z() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        assert_eq!(to_iso(ts), "2024-03-04T00:00:00.000Z");
        assert_eq!(to_ymd(ts), "2024-03-04");
    }

    #[test]
    fn effective_timestamp_prefers_published_at() {
        let ts = effective_timestamp("2024-03-04T00:00:00.000Z", "2020-01-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
        let ts = effective_timestamp("", "2020-01-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert!(effective_timestamp("garbage", "2020-01-01").is_none());
    }
}
