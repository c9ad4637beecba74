//! Calendar-day codec
//!
//! Converts between points in time and canonical `YYYY-MM-DD` date keys and
//! does calendar arithmetic on them. Date keys are also the document ids of
//! stored check-ins, so the textual form is a format contract.
//!
//! All arithmetic goes through [`NaiveDate`], never through millisecond
//! subtraction, so a 23- or 25-hour day around a DST switch still counts as
//! exactly one calendar day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// One local calendar day, rendered as `YYYY-MM-DD`.
///
/// Ordering of keys is chronological, which for the four-digit years this
/// type accepts is also the lexicographic ordering of their text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| StatsError::InvalidDateKey(format!("{:04}-{:02}-{:02}", year, month, day)))
    }

    /// Parse a key, accepting only the zero-padded `YYYY-MM-DD` form.
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(StatsError::InvalidDateKey(s.to_string()));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| StatsError::InvalidDateKey(s.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Day of week, 0 = Sunday through 6 = Saturday
    pub fn weekday(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }

    /// The previous calendar day
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The next calendar day
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Shift by a signed number of calendar days.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        let delta = chrono::Days::new(days.unsigned_abs());
        if days >= 0 {
            self.0.checked_add_days(delta).map(Self)
        } else {
            self.0.checked_sub_days(delta).map(Self)
        }
    }

    /// Shift back by whole calendar months, clamping to the month's last day.
    pub fn sub_months(&self, months: u32) -> Option<Self> {
        self.0.checked_sub_months(chrono::Months::new(months)).map(Self)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl FromStr for DateKey {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = StatsError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for DateKey {
    fn from(instant: &DateTime<Tz>) -> Self {
        date_key(instant)
    }
}

/// Project an instant onto the calendar day of its time zone.
///
/// Stable for every instant within the same local day.
pub fn date_key<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateKey {
    DateKey(instant.date_naive())
}

/// Today's key in the machine's local time zone.
///
/// Only call this at the edges; aggregation functions take `as_of` explicitly.
pub fn today() -> DateKey {
    date_key(&Local::now())
}

/// Day of week of a key or an instant, 0 = Sunday.
///
/// Instants are projected onto their own zone's calendar day first.
pub fn weekday(day: impl Into<DateKey>) -> u8 {
    day.into().weekday()
}

/// Calendar days from `b` to `a`; positive when `a` is later.
pub fn day_difference(a: DateKey, b: DateKey) -> i64 {
    (a.0 - b.0).num_days()
}

/// Every day from `start` to `end` inclusive, ascending.
pub fn days_in_interval(start: DateKey, end: DateKey) -> Result<Vec<DateKey>> {
    if start > end {
        return Err(StatsError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    Ok(start
        .0
        .iter_days()
        .take_while(|d| *d <= end.0)
        .map(DateKey)
        .collect())
}

/// The `days` most recent days ending at `end` inclusive, ascending.
///
/// `days == 0` yields an empty window.
pub fn trailing_days(end: DateKey, days: u32) -> Vec<DateKey> {
    if days == 0 {
        return Vec::new();
    }
    let start = end.add_days(-(days as i64 - 1)).unwrap_or(end);
    days_in_interval(start, end).unwrap_or_default()
}
