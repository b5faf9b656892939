//! Swedish long-form dates, e.g. `2 november 2025`.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Month names in calendar order; index 0 is January.
pub const SWEDISH_MONTHS: [&str; 12] = [
    "januari",
    "februari",
    "mars",
    "april",
    "maj",
    "juni",
    "juli",
    "augusti",
    "september",
    "oktober",
    "november",
    "december",
];

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s+(\p{L}+)\s+(\d{4})\b").expect("valid date pattern")
});

static DATED_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s+(\d{1,2}\s+\p{L}+\s+\d{4})\s*$").expect("valid dated line pattern")
});

/// Zero-based month index for a Swedish month name, ignoring case.
pub fn month_index(name: &str) -> Option<usize> {
    let lower = name.to_lowercase();
    SWEDISH_MONTHS.iter().position(|m| *m == lower)
}

/// Parses the first `<day> <month> <year>` occurrence in `text`.
///
/// The instant is placed at 12:00 UTC so that the calendar day survives
/// rendering in any nearby timezone. Returns `None` when nothing matches,
/// the month name is unknown, or the triple is not a real calendar date
/// (`29 februari 2023`).
pub fn parse_swedish_date(text: &str) -> Option<DateTime<Utc>> {
    DATE_PATTERN.captures_iter(text).find_map(|caps| {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_index(&caps[2])? as u32 + 1;
        let year: i32 = caps[3].parse().ok()?;
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(date.and_hms_opt(12, 0, 0)?.and_utc())
    })
}

/// Splits a line of the form `<title> <day> <month> <year>` into its title
/// and date parts. Lines whose trailing month is not a Swedish month name
/// are rejected.
pub fn split_dated_line(line: &str) -> Option<(String, String)> {
    let caps = DATED_LINE_PATTERN.captures(line.trim())?;
    let date_text = caps[2].to_string();
    let month = date_text.split_whitespace().nth(1)?;
    month_index(month)?;
    Some((caps[1].trim().to_string(), date_text))
}
