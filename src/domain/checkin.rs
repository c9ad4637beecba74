use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stats::DateKey;

/// What the log says about one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinStatus {
    Completed,
    /// Explicitly recorded as not done
    Missed,
    /// Nothing recorded
    NoRecord,
}

/// Sparse check-in history of one habit: date key to completed flag.
///
/// Absent days and days recorded as `false` both count as not completed.
/// Entries are kept sorted by day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckinLog(BTreeMap<DateKey, bool>);

impl CheckinLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw storage entries, validating every key.
    ///
    /// Later entries for the same day overwrite earlier ones.
    pub fn from_raw<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (day, completed) in entries {
            map.insert(DateKey::parse(day.as_ref())?, completed);
        }
        Ok(Self(map))
    }

    /// Record a day, overwriting any previous value
    pub fn set(&mut self, day: DateKey, completed: bool) {
        self.0.insert(day, completed);
    }

    pub fn get(&self, day: DateKey) -> Option<bool> {
        self.0.get(&day).copied()
    }

    pub fn is_completed(&self, day: DateKey) -> bool {
        self.get(day).unwrap_or(false)
    }

    pub fn status(&self, day: DateKey) -> CheckinStatus {
        match self.get(day) {
            Some(true) => CheckinStatus::Completed,
            Some(false) => CheckinStatus::Missed,
            None => CheckinStatus::NoRecord,
        }
    }

    /// Days marked completed, ascending
    pub fn completed_days(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.0.iter().filter(|(_, done)| **done).map(|(day, _)| *day)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_days().count()
    }

    /// All recorded entries, ascending by day
    pub fn iter(&self) -> impl Iterator<Item = (DateKey, bool)> + '_ {
        self.0.iter().map(|(day, done)| (*day, *done))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DateKey, bool)> for CheckinLog {
    fn from_iter<T: IntoIterator<Item = (DateKey, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
