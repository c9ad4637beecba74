//! Core domain types for habitline

mod checkin;
mod habit;
mod schedule;

pub use checkin::{CheckinLog, CheckinStatus};
pub use habit::{Habit, HabitSnapshot, NewHabit, Tracked};
pub use schedule::{Schedule, WEEKDAY_LETTERS, WEEKDAY_NAMES};
