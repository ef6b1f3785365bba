//! Datetime parsing and formatting helpers.
//!
//! Mixcloud sends datetimes as RFC 3339 strings and accepts UNIX timestamps
//! for `since`/`until` and `YYYY-MM-DDTHH:MM:SSZ` strings for publish dates.
//! Human-readable input is parsed leniently; timezone-naive values are taken
//! to be in the local timezone. Every result is in UTC.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Naive datetime layouts, tried in order. Month-first layouts come before
/// their day-first counterparts.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m-%d-%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

/// Date-only layouts, tried in order after [`DATETIME_FORMATS`].
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m-%d-%Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parses a datetime-like string into a UTC datetime.
///
/// Accepts RFC 3339, integer UNIX timestamps and the common naive layouts
/// (`2019-11-10T09:33:04`, `11-12-2018 09:41:05`, `17/06/2019`,
/// `Jan 1, 2020 12:33:11`, ...). Returns `None` for anything else.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use mixcloud_api::rest::parse_datetime;
///
/// assert_eq!(
///     parse_datetime("2019-04-10T07:32:56Z"),
///     Some(Utc.with_ymd_and_hms(2019, 4, 10, 7, 32, 56).unwrap())
/// );
/// assert_eq!(parse_datetime("random text"), None);
/// ```
#[must_use]
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(dt) = parse_rfc3339(text) {
        return Some(dt);
    }

    if let Ok(secs) = text.parse::<i64>() {
        return Utc.timestamp_opt(secs, 0).single();
    }

    if let Some(naive) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return local_to_utc(naive);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(local_to_utc)
}

/// Parses a strict RFC 3339 string, as used in API responses.
#[must_use]
pub fn parse_rfc3339(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Formats `dt` as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use mixcloud_api::rest::format_datetime;
///
/// let dt = Utc.with_ymd_and_hms(2019, 3, 4, 20, 23, 17).unwrap();
/// assert_eq!(format_datetime(&dt), "2019-03-04T20:23:17Z");
/// ```
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Returns the UNIX timestamp of `dt`, in whole seconds.
#[must_use]
pub fn to_timestamp(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp()
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap();
        Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_parse_naive_strings_as_local_time() {
        let cases = [
            ("2019-11-10T09:33:04", local(2019, 11, 10, 9, 33, 4)),
            ("11-12-2018 09:41:05", local(2018, 11, 12, 9, 41, 5)),
            ("10-03-2019", local(2019, 10, 3, 0, 0, 0)),
            ("17/06/2019", local(2019, 6, 17, 0, 0, 0)),
            ("Jan 1, 2020 12:33:11", local(2020, 1, 1, 12, 33, 11)),
            ("February 18, 2020 13:21:59", local(2020, 2, 18, 13, 21, 59)),
        ];

        for (text, expected) in cases {
            assert_eq!(parse_datetime(text), Some(expected), "parsing {text}");
        }
    }

    #[test]
    fn test_parse_aware_strings() {
        assert_eq!(
            parse_datetime("2019-04-10T07:32:56Z"),
            Some(Utc.with_ymd_and_hms(2019, 4, 10, 7, 32, 56).unwrap())
        );
        assert_eq!(
            parse_datetime("2018-02-12T13:00:28-02:00"),
            Some(Utc.with_ymd_and_hms(2018, 2, 12, 15, 0, 28).unwrap())
        );
    }

    #[test]
    fn test_parse_unix_timestamps() {
        assert_eq!(
            parse_datetime("-2345542"),
            Some(Utc.with_ymd_and_hms(1969, 12, 4, 20, 27, 38).unwrap())
        );
        assert_eq!(
            parse_datetime("0"),
            Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_datetime("1383429086"),
            Some(Utc.with_ymd_and_hms(2013, 11, 2, 21, 51, 26).unwrap())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_datetime("random text"), None);
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_rfc3339("2019-11-10"), None);
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2019, 3, 4, 20, 23, 17).unwrap();
        assert_eq!(format_datetime(&dt), "2019-03-04T20:23:17Z");
    }

    #[test]
    fn test_to_timestamp() {
        let dt = Utc.with_ymd_and_hms(2020, 6, 1, 18, 21, 1).unwrap();
        assert_eq!(to_timestamp(&dt), 1_591_035_661);
    }
}
