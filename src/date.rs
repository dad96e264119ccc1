//! Date conversion for the "last updated" stamps on the page.
//!
//! Accepts three year-first shapes and renders the short day-month-year form
//! used by Singaporean and Malaysian Chinese readers (e.g. "3 Oct 2025").

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Month abbreviations, January first. September is "Sept", not "Sep".
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// A date accepted by [`parse_date`].
///
/// Only constructed through a successful parse, so `month` is always in
/// 1..=12 and `day` in 1..=31. Day-of-month and leap years are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    year: u32,
    month: u32,
    day: u32,
}

impl ParsedDate {
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Abbreviated month name from [`MONTH_ABBREVIATIONS`]
    pub fn month_abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }
}

impl fmt::Display for ParsedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month_abbreviation(), self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized date: {0:?}")]
pub struct DateParseError(pub String);

impl FromStr for ParsedDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date(s).ok_or_else(|| DateParseError(s.to_string()))
    }
}

/// Accepted shapes, tried in order: `2025.10.3`, `2025-10-03`, `2025年10月3日`
fn date_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // ASCII digits only; `\d` would also accept other Unicode digits
        [
            Regex::new(r"^([0-9]{4})\.([0-9]{1,2})\.([0-9]{1,2})$").expect("valid date regex"),
            Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("valid date regex"),
            Regex::new(r"^([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日$").expect("valid date regex"),
        ]
    })
}

/// Parse a date string in one of the accepted shapes.
///
/// Surrounding whitespace is ignored. Returns `None` when no shape matches or
/// the month/day fall outside 1..=12 / 1..=31.
pub fn parse_date(text: &str) -> Option<ParsedDate> {
    let text = text.trim();

    for pattern in date_patterns() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };

        // At most four ASCII digits per field, so these cannot overflow
        let year: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;

        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            return Some(ParsedDate { year, month, day });
        }
    }

    None
}

/// Render as `"{day} {MonthAbbrev} {year}"` without zero-padding the day
pub fn format_date(date: &ParsedDate) -> String {
    date.to_string()
}

/// Parse then format; `None` if the text is not an accepted date
pub fn convert_date(text: &str) -> Option<String> {
    parse_date(text).map(|date| format_date(&date))
}

/// Wrap a formatted date in the page's "update log" banner
pub fn decorate_date(formatted: &str) -> String {
    format!("✨ {} | 更新记录 ✨", formatted)
}
