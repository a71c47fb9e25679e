//! Conversion between provider timestamps and the practitioner's wall clock.
//!
//! This belongs to the calendar-fetching side: the calculator itself only ever
//! sees local `NaiveDateTime` values.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};
use crate::interval::BusyInterval;

/// Parse an IANA timezone name (e.g., "Europe/Paris").
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Wall-clock time in `tz` for an absolute instant.
pub fn to_local(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// Wall-clock busy interval in `tz` for the absolute span `[start, end)`.
///
/// Across a fall-back transition the wall clock repeats, so the local end can
/// land at or before the local start. The interval is then widened to cover
/// both passes through the repeated hour, bounded by the offset change and by
/// the real duration.
///
/// # Errors
/// `MalformedInterval` when `end` is not after `start` as instants.
pub fn to_local_interval(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> Result<BusyInterval> {
    if end <= start {
        return Err(SlotError::MalformedInterval {
            start: start.naive_utc(),
            end: end.naive_utc(),
        });
    }
    let span = end - start;
    let (local_start, local_end) = (to_local(start, tz), to_local(end, tz));
    // Offset lost between the two endpoints; positive only across a fall-back.
    let folded = span - (local_end - local_start);
    if folded <= TimeDelta::zero() {
        return BusyInterval::new(local_start, local_end);
    }
    let lower = (local_start - folded).max(local_end - span).min(local_start);
    let upper = (local_end + folded).min(local_start + span).max(local_end);
    BusyInterval::new(lower, upper)
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 with an offset (e.g., "2026-03-16T09:00:00+01:00") and
/// naive "2026-03-16T09:00:00", which is interpreted as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| SlotError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// Parse a calendar day in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| SlotError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// The UTC instant at which local midnight of `day` occurs in `tz`.
///
/// When midnight falls in a DST gap the first valid instant after it is used;
/// when it is ambiguous the earlier instant wins.
pub fn start_of_day_utc(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        // Midnight is inside a DST gap; gaps in tzdata are at most an hour long.
        LocalResult::None => {
            let shifted = midnight + chrono::TimeDelta::hours(1);
            match tz.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
                LocalResult::None => midnight.and_utc(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn paris_winter_is_utc_plus_one() {
        let tz = parse_timezone("Europe/Paris").unwrap();
        let instant = Utc.with_ymd_and_hms(2026, 1, 12, 8, 0, 0).unwrap();
        assert_eq!(to_local(instant, tz).hour(), 9);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(SlotError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn naive_datetime_is_read_as_utc() {
        let dt = parse_datetime("2026-03-16T09:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn start_of_day_follows_the_offset() {
        let tz = parse_timezone("Europe/Paris").unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        assert_eq!(
            start_of_day_utc(day, tz),
            Utc.with_ymd_and_hms(2026, 6, 30, 22, 0, 0).unwrap()
        );
    }

    fn paris_wall(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 25)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn interval_inside_the_repeated_hour_covers_both_passes() {
        // 00:50Z is 02:50 CEST, 01:10Z is 02:10 CET.
        let start = Utc.with_ymd_and_hms(2026, 10, 25, 0, 50, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 10, 25, 1, 10, 0).unwrap();

        let busy = to_local_interval(start, end, chrono_tz::Europe::Paris).unwrap();

        assert!(busy.start <= paris_wall(2, 0));
        assert!(busy.end >= paris_wall(3, 0));
        assert_eq!(busy.start, paris_wall(1, 50));
        assert_eq!(busy.end, paris_wall(3, 10));
    }

    #[test]
    fn interval_away_from_transitions_is_a_plain_conversion() {
        let start = Utc.with_ymd_and_hms(2026, 10, 26, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 10, 26, 9, 0, 0).unwrap();

        let busy = to_local_interval(start, end, chrono_tz::Europe::Paris).unwrap();

        let day = NaiveDate::from_ymd_opt(2026, 10, 26).unwrap();
        assert_eq!(busy.start, day.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(busy.end, day.and_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn inverted_instants_are_malformed() {
        let start = Utc.with_ymd_and_hms(2026, 10, 25, 1, 10, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 10, 25, 0, 50, 0).unwrap();

        assert!(matches!(
            to_local_interval(start, end, chrono_tz::Europe::Paris),
            Err(SlotError::MalformedInterval { .. })
        ));
    }
}
