// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date parsing and formatting.
//!
//! Dates are stored as free-form strings and only interpreted when they are
//! rendered or compared. Zoneless inputs are read as UTC.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};

/// Rendering used for dates that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

const LONG_DATE_FORMATS: &[&str] = &["%B %d, %Y", "%B %d %Y", "%d %B %Y"];

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Parse a caller-supplied date string into a UTC instant.
///
/// Accepts `YYYY`, `YYYY-MM`, RFC 3339, numeric dates (`Y-M-D`, `Y/M/D`,
/// `Y.M.D`, `M/D/Y`) with an optional `HH:MM[:SS]` time, and long forms
/// such as `January 15, 2023` or `Sun Jan 15 2023`. A day past the end of
/// its month rolls into the next month; a leading weekday is ignored.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(date) = parse_partial_iso(raw) {
        return Some(midnight(date));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = parse_numeric(raw) {
        return Some(dt);
    }

    let without_weekday = strip_weekday(raw);
    LONG_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(without_weekday, fmt).ok())
        .map(midnight)
}

/// Render a stored date as `Www Mmm DD YYYY` (e.g. `Sun Jan 15 2023`).
pub fn to_date_string(raw: &str) -> String {
    parse_date(raw)
        .map(|dt| dt.format("%a %b %d %Y").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// `YYYY` or `YYYY-MM`, which chrono's format parser cannot express.
fn parse_partial_iso(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('-');
    let year = parts.next().filter(|y| is_digits(y, 4))?;
    let month = match parts.next() {
        None => "01",
        Some(m) if is_digits(m, 2) => m,
        Some(_) => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// A numeric date with `-`, `/` or `.` separators, optionally followed by
/// `T` or a space and a time of day.
fn parse_numeric(raw: &str) -> Option<DateTime<Utc>> {
    let (date_part, time_part) = match raw.find(|c: char| c == 'T' || c == ' ') {
        Some(idx) => (&raw[..idx], Some(raw[idx + 1..].trim())),
        None => (raw, None),
    };

    let sep = date_part.chars().find(|c| matches!(c, '-' | '/' | '.'))?;
    let fields: Vec<&str> = date_part.split(sep).collect();
    let [a, b, c] = fields.as_slice() else {
        return None;
    };
    if ![a, b, c]
        .iter()
        .all(|f| !f.is_empty() && f.bytes().all(|byte| byte.is_ascii_digit()))
    {
        return None;
    }

    // Year first, or US month/day/year.
    let (year, month, day) = if a.len() == 4 {
        (a, b, c)
    } else if sep == '/' && c.len() == 4 {
        (c, a, b)
    } else {
        return None;
    };
    let date = ymd_rolling(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;

    let time = match time_part {
        None => NaiveTime::default(),
        Some(t) => TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(t, fmt).ok())?,
    };
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

/// Build a date, letting days 29-31 run past a shorter month.
fn ymd_rolling(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}

/// Drop a leading weekday name (full or abbreviated); it never affects the date.
fn strip_weekday(raw: &str) -> &str {
    let Some((first, rest)) = raw.split_once(' ') else {
        return raw;
    };
    let word = first.trim_end_matches(',').to_ascii_lowercase();
    let is_weekday = word.len() >= 3 && WEEKDAYS.iter().any(|day| day.starts_with(word.as_str()));
    if is_weekday {
        rest.trim_start()
    } else {
        raw
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}
