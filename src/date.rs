//! Strict parsing of date-valued headers.
//!
//! Only the RFC 5322 / RFC 7231 preferred shape is accepted, e.g.
//! `Wed, 21 Oct 2015 07:28:00 GMT`. There are no fallback formats.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use crate::error::{Error, Result};

const DATE_TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

const EXPECTED: &str = "format \"EEE, dd MMM yyyy HH:mm:ss z\" (RFC 5322)";

const HOUR: i32 = 3600;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parses a header date such as `Wed, 21 Oct 2015 07:28:00 GMT`.
///
/// Weekday and month names may be abbreviated or written in full, in any
/// case. The weekday must agree with the calendar date. The zone may be a
/// GMT/UTC name, a US zone abbreviation, `GMT+hh:mm`, or `+hhmm`.
///
/// # Examples
///
/// ```
/// use handshake_adapter::parse_http_date;
///
/// let date = parse_http_date("Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
/// assert_eq!(date.timestamp(), 1_445_412_480);
///
/// let long = parse_http_date("Wednesday, 21 October 2015 07:28:00 GMT").unwrap();
/// assert_eq!(long, date);
///
/// assert!(parse_http_date("2015-10-21").is_err());
/// ```
pub fn parse_http_date(value: &str) -> Result<DateTime<FixedOffset>> {
    parse_with_header("Date", value)
}

/// Parses a date header value, naming `header` in any error.
pub(crate) fn parse_with_header(header: &str, value: &str) -> Result<DateTime<FixedOffset>> {
    let invalid = || Error::invalid_header(header, value, EXPECTED);

    let (date_time, zone) = value.rsplit_once(' ').ok_or_else(invalid)?;
    let offset = parse_zone(zone).ok_or_else(invalid)?;
    let naive = NaiveDateTime::parse_from_str(&abbreviate_names(date_time), DATE_TIME_FORMAT)
        .map_err(|e| invalid().with_source(e))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(invalid)
}

/// Folds a full weekday (first token, before its comma) and month (third
/// token) to the three-letter form `DATE_TIME_FORMAT` expects.
fn abbreviate_names(date_time: &str) -> String {
    date_time
        .split(' ')
        .enumerate()
        .map(|(position, token)| match position {
            0 => match token.strip_suffix(',').and_then(|day| abbreviation(day, &WEEKDAYS)) {
                Some(short) => format!("{},", short),
                None => token.to_string(),
            },
            2 => abbreviation(token, &MONTHS).map_or(token, |short| short).to_string(),
            _ => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn abbreviation(name: &str, full_names: &[&'static str]) -> Option<&'static str> {
    full_names
        .iter()
        .copied()
        .find(|full| full.eq_ignore_ascii_case(name))
        .map(|full| &full[..3])
}

fn parse_zone(zone: &str) -> Option<FixedOffset> {
    let hours = match zone.to_ascii_uppercase().as_str() {
        "GMT" | "UT" | "UTC" | "Z" => Some(0),
        "EDT" => Some(-4),
        "EST" | "CDT" => Some(-5),
        "CST" | "MDT" => Some(-6),
        "MST" | "PDT" => Some(-7),
        "PST" => Some(-8),
        _ => None,
    };
    if let Some(hours) = hours {
        return FixedOffset::east_opt(hours * HOUR);
    }

    let numeric = zone
        .strip_prefix("GMT")
        .or_else(|| zone.strip_prefix("UTC"))
        .unwrap_or(zone);
    parse_numeric_offset(numeric)
}

/// Parses `+hh:mm`, `+hhmm` or `+hh` (and the `-` forms).
fn parse_numeric_offset(offset: &str) -> Option<FixedOffset> {
    let (sign, rest) = match *offset.as_bytes().first()? {
        b'+' => (1, &offset[1..]),
        b'-' => (-1, &offset[1..]),
        _ => return None,
    };
    if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) if (1..=2).contains(&h.len()) && m.len() == 2 => (h, m),
        Some(_) => return None,
        None if rest.len() == 4 => rest.split_at(2),
        None if (1..=2).contains(&rest.len()) => (rest, "00"),
        None => return None,
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * HOUR + minutes * 60))
}
