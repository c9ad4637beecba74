use serde::{Deserialize, Serialize};

/// Single-letter labels for weekdays, Sunday first
pub const WEEKDAY_LETTERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Short weekday names, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The set of weekdays a habit is meant to be done on.
///
/// Weekdays are indexed 0 = Sunday through 6 = Saturday. Stored as a bitmask,
/// serialized as the ascending list of indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Schedule(u8);

impl Schedule {
    /// A schedule with no target days (degenerate, never scheduled)
    pub fn empty() -> Self {
        Self(0)
    }

    /// Every day of the week, the default for new habits
    pub fn every_day() -> Self {
        Self(0b111_1111)
    }

    /// Monday through Friday
    pub fn weekdays() -> Self {
        Self(0b011_1110)
    }

    /// Saturday and Sunday
    pub fn weekends() -> Self {
        Self(0b100_0001)
    }

    /// Build from weekday indices. Returns None if any index is above 6.
    pub fn from_days<I: IntoIterator<Item = u8>>(days: I) -> Option<Self> {
        let mut mask = 0u8;
        for day in days {
            if day > 6 {
                return None;
            }
            mask |= 1 << day;
        }
        Some(Self(mask))
    }

    /// Parse a comma separated list such as "1,2,3,4,5".
    ///
    /// Also accepts the preset names `daily`, `weekdays` and `weekends`.
    /// An empty string is the empty schedule.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "everyday" | "every-day" => return Some(Self::every_day()),
            "weekdays" => return Some(Self::weekdays()),
            "weekends" => return Some(Self::weekends()),
            "" => return Some(Self::empty()),
            _ => {}
        }

        let days: Option<Vec<u8>> = s
            .split(',')
            .map(|part| part.trim().parse::<u8>().ok())
            .collect();
        Self::from_days(days?)
    }

    pub fn contains(&self, weekday: u8) -> bool {
        weekday <= 6 && self.0 & (1 << weekday) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of target days per week
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Target days in ascending order
    pub fn days(&self) -> Vec<u8> {
        (0..7).filter(|d| self.contains(*d)).collect()
    }

    /// Add the day if absent, remove it if present
    pub fn toggle(&mut self, weekday: u8) {
        if weekday <= 6 {
            self.0 ^= 1 << weekday;
        }
    }

    /// Storage form, e.g. "1,2,3,4,5"
    pub fn to_csv(&self) -> String {
        self.days()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Seven letters with unscheduled days shown as '·', e.g. "·MTWTF·"
    pub fn label(&self) -> String {
        (0..7u8)
            .map(|d| if self.contains(d) { WEEKDAY_LETTERS[d as usize] } else { "·" })
            .collect()
    }
}

impl TryFrom<Vec<u8>> for Schedule {
    type Error = String;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_days(days.iter().copied())
            .ok_or_else(|| format!("weekday out of range in {:?}, expected 0-6", days))
    }
}

impl From<Schedule> for Vec<u8> {
    fn from(schedule: Schedule) -> Self {
        schedule.days()
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::every_day() {
            return write!(f, "every day");
        }
        if *self == Self::weekdays() {
            return write!(f, "weekdays");
        }
        if *self == Self::weekends() {
            return write!(f, "weekends");
        }
        if self.is_empty() {
            return write!(f, "never");
        }
        let names: Vec<&str> = self.days().iter().map(|d| WEEKDAY_NAMES[*d as usize]).collect();
        write!(f, "{}", names.join(", "))
    }
}
