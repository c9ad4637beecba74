//! Shared test utilities for store integration tests

#![allow(dead_code)]

use tempfile::TempDir;

use habitline::domain::{Habit, NewHabit, Schedule};
use habitline::stats::DateKey;
use habitline::store::HabitStore;

pub const USER: &str = "tester";

/// Opens a file-backed store in a fresh temp dir
pub fn create_test_store() -> (TempDir, HabitStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = HabitStore::open(&temp_dir.path().join("habits.db")).expect("Failed to open store");
    (temp_dir, store)
}

pub fn key(s: &str) -> DateKey {
    DateKey::parse(s).expect("Invalid test date")
}

/// Adds a habit starting 2025-01-01
pub fn add_habit(store: &HabitStore, name: &str, schedule: Schedule) -> Habit {
    store
        .recorder()
        .add_habit(USER, NewHabit::new(name).with_schedule(schedule).starting(key("2025-01-01")))
        .expect("Failed to add habit")
}

/// Marks every listed day as done
pub fn check_days(store: &HabitStore, habit: &Habit, days: &[&str]) {
    for day in days {
        store
            .recorder()
            .set_checkin(&habit.id, key(day), true)
            .expect("Failed to record check-in");
    }
}
