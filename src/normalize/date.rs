//! Date normalization
//!
//! Converts `year/month/day` strings into the epoch timestamp of local midnight.

use chrono::{Local, NaiveDate, TimeZone};

use crate::error::{ActivityLogError, Result};

/// Seconds since the Unix epoch at local midnight of a calendar date
pub type Timestamp = i64;

/// Separator between the year, month and day components
pub const DATE_SEPARATOR: char = '/';

/// Years a table date may carry
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Parse a `Y/M/D` string into a calendar date
///
/// Components may be unpadded and may carry surrounding whitespace. The year must
/// lie in [`YEAR_RANGE`]; no other calendar checks are made beyond what date
/// construction itself rejects.
///
/// # Errors
/// Returns `MalformedDate` if the string does not have exactly three integer
/// components, the year is out of range, or the components do not form a real date.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = s.split(DATE_SEPARATOR).map(str::trim).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(ActivityLogError::malformed_date(
            s,
            format!("expected 3 '/'-separated components, found {}", parts.len()),
        ));
    };

    let year = year
        .parse::<i32>()
        .map_err(|e| ActivityLogError::malformed_date(s, format!("year '{year}': {e}")))?;
    if !YEAR_RANGE.contains(&year) {
        return Err(ActivityLogError::malformed_date(
            s,
            format!("year {year} is outside {}..={}", YEAR_RANGE.start(), YEAR_RANGE.end()),
        ));
    }
    let month = month
        .parse::<u32>()
        .map_err(|e| ActivityLogError::malformed_date(s, format!("month '{month}': {e}")))?;
    let day = day
        .parse::<u32>()
        .map_err(|e| ActivityLogError::malformed_date(s, format!("day '{day}': {e}")))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ActivityLogError::malformed_date(s, format!("{year}-{month}-{day} is not a calendar date"))
    })
}

/// Epoch timestamp of midnight on `date` in the given time zone
///
/// When midnight occurs twice (a DST fold) the earlier instant is used.
///
/// # Errors
/// Returns `MalformedDate` if midnight does not exist on that date in `tz`.
pub fn midnight_timestamp<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<Timestamp> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ActivityLogError::malformed_date(&date.to_string(), "no midnight"))?;

    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| {
            ActivityLogError::malformed_date(
                &date.to_string(),
                "local midnight is skipped by a time zone transition",
            )
        })
}

/// Normalize a `Y/M/D` string to a timestamp in the given time zone
pub fn normalize_date_in<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<Timestamp> {
    let date = parse_calendar_date(s)?;
    midnight_timestamp(date, tz).map_err(|e| match e {
        ActivityLogError::MalformedDate { reason, .. } => {
            ActivityLogError::malformed_date(s, reason)
        }
        other => other,
    })
}

/// Normalize a `Y/M/D` string to the timestamp of local midnight
///
/// # Errors
/// Returns `MalformedDate` for anything [`parse_calendar_date`] rejects.
pub fn normalize_date(s: &str) -> Result<Timestamp> {
    normalize_date_in(s, &Local)
}
