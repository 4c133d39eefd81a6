//! Week and day boundary math for quota windows.
//!
//! Quota windows are Monday-aligned 7-day periods. Boundaries can be computed
//! in the user's IANA timezone; results are always returned as UTC instants
//! so they can be compared against stored timestamps directly.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Parse an IANA timezone name (e.g. `America/Sao_Paulo`).
pub fn parse_timezone(name: &str) -> Result<Tz, CoreError> {
    name.parse::<Tz>()
        .map_err(|_| CoreError::Validation(format!("Unknown timezone: {name}")))
}

/// Resolve a civil date + time in `tz` to a UTC instant.
///
/// During DST transitions a local time can be ambiguous or nonexistent; the
/// earliest valid interpretation is used, falling forward by an hour for
/// skipped times.
fn civil_to_utc(tz: Tz, date: NaiveDate, time: NaiveTime) -> Timestamp {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        chrono::LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            // A full civil day cannot be skipped by a DST rule.
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

/// The civil date of `instant` in `tz`, or in UTC when no timezone is given.
fn local_date(instant: Timestamp, tz: Option<Tz>) -> NaiveDate {
    match tz {
        Some(tz) => instant.with_timezone(&tz).date_naive(),
        None => instant.date_naive(),
    }
}

/// Midnight of a civil date as a UTC instant.
fn midnight(date: NaiveDate, tz: Option<Tz>) -> Timestamp {
    let time = NaiveTime::MIN;
    match tz {
        Some(tz) => civil_to_utc(tz, date, time),
        None => Utc.from_utc_datetime(&date.and_time(time)),
    }
}

/// Monday 00:00 of the week containing `instant`.
///
/// A Sunday belongs to the week of the *preceding* Monday.
pub fn start_of_week(instant: Timestamp, tz: Option<Tz>) -> Timestamp {
    let date = local_date(instant, tz);
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    midnight(monday, tz)
}

/// Midnight of the Monday *after* the week containing `instant` (exclusive
/// upper bound of the quota window).
pub fn end_of_week(instant: Timestamp, tz: Option<Tz>) -> Timestamp {
    let date = local_date(instant, tz);
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    midnight(monday + Duration::days(7), tz)
}

/// Midnight of the day containing `instant`.
pub fn start_of_day(instant: Timestamp, tz: Option<Tz>) -> Timestamp {
    midnight(local_date(instant, tz), tz)
}

/// Midnight of the day after `instant` (exclusive upper bound).
pub fn end_of_day(instant: Timestamp, tz: Option<Tz>) -> Timestamp {
    midnight(local_date(instant, tz) + Duration::days(1), tz)
}

/// Whether `instant` falls on the same civil day as `now`.
pub fn is_today(instant: Timestamp, now: Timestamp, tz: Option<Tz>) -> bool {
    local_date(instant, tz) == local_date(now, tz)
}

/// Whether `instant` falls on the civil day after `now`.
pub fn is_tomorrow(instant: Timestamp, now: Timestamp, tz: Option<Tz>) -> bool {
    local_date(instant, tz) == local_date(now, tz) + Duration::days(1)
}
