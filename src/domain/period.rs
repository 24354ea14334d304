//! Date-range math for subscription terms.
//!
//! These functions run while rendering, so malformed input degrades to
//! sentinel values instead of failing: unparseable timestamps yield zero
//! progress and `None` days remaining.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parses an ISO-8601-ish timestamp as produced by the backend.
///
/// Accepts RFC 3339, a naive datetime without offset, and a bare date
/// (interpreted as midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Percentage of the `[start, end]` range elapsed at `now`, in `[0, 100]`.
///
/// A degenerate range (`end <= start`) yields 0 so the guard also covers the
/// divide-by-zero case.
pub fn progress_percent(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> u8 {
    if end <= start || now <= start {
        return 0;
    }
    if now >= end {
        return 100;
    }
    let total = (end - start).num_milliseconds() as f64;
    let elapsed = (now - start).num_milliseconds() as f64;
    (elapsed / total * 100.0).round() as u8
}

/// Like [`progress_percent`] but over raw backend timestamps.
///
/// Unparseable input yields 0.
pub fn progress_percent_between(start: &str, end: &str, now: DateTime<Utc>) -> u8 {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(start), Some(end)) => progress_percent(start, end, now),
        _ => 0,
    }
}

/// Whole days from `now` until `target`, rounded up; negative for past dates.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (target - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Like [`days_until`] but over a raw backend timestamp.
///
/// Returns `None` when the target is unparseable so callers can tell "no
/// data" apart from "zero days".
pub fn days_until_date(target: &str, now: DateTime<Utc>) -> Option<i64> {
    parse_timestamp(target).map(|target| days_until(target, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn parse_timestamp_accepts_backend_formats() {
        assert!(parse_timestamp("2024-01-01T12:30:00Z").is_some());
        assert!(parse_timestamp("2024-01-01T12:30:00+03:00").is_some());
        assert!(parse_timestamp("2024-01-01T12:30:00.125").is_some());
        assert!(parse_timestamp("2024-01-01").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("   ").is_none());
    }

    #[test]
    fn progress_is_halfway_through_january() {
        let percent = progress_percent(ts("2024-01-01"), ts("2024-01-31"), ts("2024-01-16"));
        assert_eq!(percent, 50);
    }

    #[test]
    fn progress_clamps_outside_the_range() {
        let start = ts("2024-01-01");
        let end = ts("2024-01-31");
        assert_eq!(progress_percent(start, end, ts("2023-12-01")), 0);
        assert_eq!(progress_percent(start, end, start), 0);
        assert_eq!(progress_percent(start, end, end), 100);
        assert_eq!(progress_percent(start, end, ts("2024-02-15")), 100);
    }

    #[test]
    fn inverted_range_degrades_to_zero() {
        assert_eq!(
            progress_percent(ts("2024-01-31"), ts("2024-01-01"), ts("2024-01-16")),
            0
        );
        assert_eq!(
            progress_percent(ts("2024-01-01"), ts("2024-01-01"), ts("2024-01-16")),
            0
        );
    }

    #[test]
    fn unparseable_bounds_degrade_to_zero() {
        assert_eq!(
            progress_percent_between("not-a-date", "2024-01-31", ts("2024-01-16")),
            0
        );
        assert_eq!(
            progress_percent_between("2024-01-01", "", ts("2024-01-16")),
            0
        );
    }

    #[test]
    fn days_until_counts_past_dates_negative() {
        assert_eq!(days_until(ts("2024-01-01"), ts("2024-01-10")), -9);
    }

    #[test]
    fn days_until_rounds_partial_days_up() {
        assert_eq!(days_until(ts("2024-01-02T06:00:00Z"), ts("2024-01-01")), 2);
        assert_eq!(days_until(ts("2024-01-02"), ts("2024-01-01")), 1);
        assert_eq!(days_until(ts("2024-01-01"), ts("2024-01-01")), 0);
    }

    #[test]
    fn days_until_date_distinguishes_missing_data() {
        assert_eq!(days_until_date("garbage", ts("2024-01-10")), None);
        assert_eq!(days_until_date("2024-01-10", ts("2024-01-10")), Some(0));
    }
}
