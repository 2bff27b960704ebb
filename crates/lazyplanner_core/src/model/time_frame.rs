//! Time-frame keys and occurrence addressing.
//!
//! # Responsibility
//! - Parse and render period keys ("2025-W15", "2025-04", "2025", "life").
//! - Compare period keys chronologically within the same period kind.
//! - Address one occurrence of an entry (a calendar date or a period).
//!
//! # Invariants
//! - Rendering a parsed key reproduces the input string exactly.
//! - Chronological comparison is only defined between keys of the same
//!   period kind; mixed-kind comparison is always false.

use chrono::{NaiveDate, Weekday};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Wire date format used everywhere a calendar date is persisted.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error for malformed time-frame key or date strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError {
    input: String,
}

impl ParseKeyError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

impl Display for ParseKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid time-frame key `{}`", self.input)
    }
}

impl Error for ParseKeyError {}

/// One goal period: an ISO week, a calendar month, a year, or the
/// whole-life horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeFrameKey {
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
    Year(i32),
    Life,
}

impl TimeFrameKey {
    /// Returns true when `self` is the same period kind as `other` and
    /// starts at or before it. Mixed kinds never compare.
    pub fn is_at_or_before(&self, other: &TimeFrameKey) -> bool {
        match (self, other) {
            (
                Self::Week { year: y1, week: w1 },
                Self::Week { year: y2, week: w2 },
            ) => (y1, w1) <= (y2, w2),
            (
                Self::Month {
                    year: y1,
                    month: m1,
                },
                Self::Month {
                    year: y2,
                    month: m2,
                },
            ) => (y1, m1) <= (y2, m2),
            (Self::Year(y1), Self::Year(y2)) => y1 <= y2,
            (Self::Life, Self::Life) => true,
            _ => false,
        }
    }
}

impl Display for TimeFrameKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Week { year, week } => write!(f, "{year:04}-W{week:02}"),
            Self::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::Year(year) => write!(f, "{year:04}"),
            Self::Life => write!(f, "life"),
        }
    }
}

impl FromStr for TimeFrameKey {
    type Err = ParseKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "life" {
            return Ok(Self::Life);
        }

        if let Some((year_text, rest)) = value.split_once('-') {
            let year: i32 = year_text
                .parse()
                .map_err(|_| ParseKeyError::new(value))?;
            if year_text.len() != 4 {
                return Err(ParseKeyError::new(value));
            }
            if let Some(week_text) = rest.strip_prefix('W') {
                let week: u32 = week_text
                    .parse()
                    .map_err(|_| ParseKeyError::new(value))?;
                if !(1..=53).contains(&week) {
                    return Err(ParseKeyError::new(value));
                }
                return Ok(Self::Week { year, week });
            }
            let month: u32 = rest.parse().map_err(|_| ParseKeyError::new(value))?;
            if !(1..=12).contains(&month) {
                return Err(ParseKeyError::new(value));
            }
            return Ok(Self::Month { year, month });
        }

        if value.len() == 4 {
            if let Ok(year) = value.parse::<i32>() {
                return Ok(Self::Year(year));
            }
        }

        Err(ParseKeyError::new(value))
    }
}

/// Addresses one occurrence of an entry: a calendar date for daily
/// tasks, or a period key for goals.
///
/// A single key type lets completion and position overlays share one
/// resolution path instead of splitting into per-date and per-period
/// branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OccurrenceKey {
    Date(NaiveDate),
    TimeFrame(TimeFrameKey),
}

impl Display for OccurrenceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::TimeFrame(key) => write!(f, "{key}"),
        }
    }
}

impl FromStr for OccurrenceKey {
    type Err = ParseKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Ok(date) = parse_date(value) {
            return Ok(Self::Date(date));
        }
        value.parse::<TimeFrameKey>().map(Self::TimeFrame)
    }
}

/// Parses a wire-format `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseKeyError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ParseKeyError::new(value))
}

/// Full English weekday name as stored in persisted `repeatedDays` sets.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a full English weekday name from persisted data.
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    match value {
        "Monday" => Some(Weekday::Mon),
        "Tuesday" => Some(Weekday::Tue),
        "Wednesday" => Some(Weekday::Wed),
        "Thursday" => Some(Weekday::Thu),
        "Friday" => Some(Weekday::Fri),
        "Saturday" => Some(Weekday::Sat),
        "Sunday" => Some(Weekday::Sun),
        _ => None,
    }
}
