use serde::{Deserialize, Serialize};

use super::{CheckinLog, Schedule};
use crate::stats::DateKey;

/// A habit as kept by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub schedule: Schedule,
    pub start_date: DateKey,
    pub archived: bool,
    /// Creation time (ms since epoch), used for newest-first ordering
    pub created_at: i64,
}

impl Habit {
    pub fn is_scheduled_on(&self, day: DateKey) -> bool {
        self.schedule.contains(day.weekday())
    }
}

/// Fields needed to create a habit
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub name: String,
    pub schedule: Schedule,
    /// Defaults to today when None
    pub start_date: Option<DateKey>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schedule: Schedule::every_day(),
            start_date: None,
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn starting(mut self, day: DateKey) -> Self {
        self.start_date = Some(day);
        self
    }
}

/// Anything the aggregation functions can read a schedule and log from
pub trait Tracked {
    fn schedule(&self) -> &Schedule;
    fn log(&self) -> &CheckinLog;
}

impl Tracked for (Schedule, CheckinLog) {
    fn schedule(&self) -> &Schedule {
        &self.0
    }

    fn log(&self) -> &CheckinLog {
        &self.1
    }
}

impl<T: Tracked + ?Sized> Tracked for &T {
    fn schedule(&self) -> &Schedule {
        (**self).schedule()
    }

    fn log(&self) -> &CheckinLog {
        (**self).log()
    }
}

/// A habit paired with an immutable copy of its check-in log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSnapshot {
    pub habit: Habit,
    pub log: CheckinLog,
}

impl Tracked for HabitSnapshot {
    fn schedule(&self) -> &Schedule {
        &self.habit.schedule
    }

    fn log(&self) -> &CheckinLog {
        &self.log
    }
}
