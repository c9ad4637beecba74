//! Habit recorder - writes habits and check-ins to the database
//!
//! Check-in writes are last-write-wins per (habit, day).

use anyhow::{Result, bail};
use chrono::Utc;
use tracing::{debug, info};

use super::db::StoreDb;
use super::feed::SnapshotFeed;
use super::reader::HabitReader;
use crate::domain::{Habit, NewHabit, Schedule};
use crate::stats::{self, DateKey};

/// Records habit and check-in changes, publishing snapshots as it goes
#[derive(Clone)]
pub struct HabitRecorder {
    db: StoreDb,
    feed: SnapshotFeed,
}

impl HabitRecorder {
    pub fn new(db: StoreDb, feed: SnapshotFeed) -> Self {
        Self { db, feed }
    }

    /// Create a habit for `user`
    pub fn add_habit(&self, user: &str, new: NewHabit) -> Result<Habit> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            bail!("Habit name must not be empty");
        }
        if new.schedule.is_empty() {
            bail!("Habit '{}' needs at least one target day", name);
        }

        let habit = Habit {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            schedule: new.schedule,
            start_date: new.start_date.unwrap_or_else(stats::today),
            archived: false,
            created_at: Utc::now().timestamp_millis(),
        };

        let conn = self.db.conn();
        conn.execute(
            r#"INSERT INTO habits (id, user_id, name, target_days, start_date, archived, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)"#,
            rusqlite::params![
                habit.id,
                user,
                habit.name,
                habit.schedule.to_csv(),
                habit.start_date.to_string(),
                habit.created_at,
            ],
        )?;
        drop(conn);

        info!(habit_id = %habit.id, name = %habit.name, schedule = %habit.schedule, "Added habit");
        self.feed.touch();
        Ok(habit)
    }

    /// Rename and/or reschedule a habit. Past check-ins are kept as they are.
    pub fn update_habit(&self, habit_id: &str, name: Option<&str>, schedule: Option<Schedule>) -> Result<Habit> {
        let conn = self.db.conn();
        let Some(mut habit) = HabitReader::habit_with(&conn, habit_id)? else {
            bail!("Unknown habit: {}", habit_id);
        };

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                bail!("Habit name must not be empty");
            }
            habit.name = name.to_string();
        }
        if let Some(schedule) = schedule {
            if schedule.is_empty() {
                bail!("Habit '{}' needs at least one target day", habit.name);
            }
            habit.schedule = schedule;
        }

        conn.execute(
            "UPDATE habits SET name = ?1, target_days = ?2 WHERE id = ?3",
            rusqlite::params![habit.name, habit.schedule.to_csv(), habit.id],
        )?;
        drop(conn);

        info!(habit_id, name = %habit.name, schedule = %habit.schedule, "Updated habit");
        self.feed.touch();
        Ok(habit)
    }

    pub fn set_archived(&self, habit_id: &str, archived: bool) -> Result<()> {
        let changed = self.db.conn().execute(
            "UPDATE habits SET archived = ?1 WHERE id = ?2",
            rusqlite::params![archived, habit_id],
        )?;
        if changed == 0 {
            bail!("Unknown habit: {}", habit_id);
        }
        info!(habit_id, archived, "Set archived flag");
        self.feed.touch();
        Ok(())
    }

    /// Flip the archived flag, returning the new value
    pub fn toggle_archived(&self, habit_id: &str) -> Result<bool> {
        let archived = {
            let conn = self.db.conn();
            let Some(habit) = HabitReader::habit_with(&conn, habit_id)? else {
                bail!("Unknown habit: {}", habit_id);
            };
            !habit.archived
        };
        self.set_archived(habit_id, archived)?;
        Ok(archived)
    }

    /// Delete a habit together with all of its check-ins
    pub fn delete_habit(&self, habit_id: &str) -> Result<()> {
        let removed = self
            .db
            .conn()
            .execute("DELETE FROM habits WHERE id = ?1", [habit_id])?;
        if removed == 0 {
            bail!("Unknown habit: {}", habit_id);
        }
        info!(habit_id, "Deleted habit");
        self.feed.close(habit_id);
        Ok(())
    }

    /// Record a check-in value for one day, overwriting any previous value
    pub fn set_checkin(&self, habit_id: &str, day: DateKey, completed: bool) -> Result<()> {
        {
            let conn = self.db.conn();
            if HabitReader::habit_with(&conn, habit_id)?.is_none() {
                bail!("Unknown habit: {}", habit_id);
            }
            Self::write_checkin(&conn, habit_id, day, completed)?;
        }
        info!(habit_id, day = %day, completed, "Recorded check-in");
        self.publish(habit_id)
    }

    /// Flip one day's check-in (absent counts as not done), returning the new value
    pub fn toggle_checkin(&self, habit_id: &str, day: DateKey) -> Result<bool> {
        let completed = {
            let conn = self.db.conn();
            if HabitReader::habit_with(&conn, habit_id)?.is_none() {
                bail!("Unknown habit: {}", habit_id);
            }
            let current = HabitReader::log_with(&conn, habit_id)?.is_completed(day);
            Self::write_checkin(&conn, habit_id, day, !current)?;
            !current
        };
        info!(habit_id, day = %day, completed, "Toggled check-in");
        self.publish(habit_id)?;
        Ok(completed)
    }

    fn write_checkin(conn: &rusqlite::Connection, habit_id: &str, day: DateKey, completed: bool) -> Result<()> {
        conn.execute(
            r#"INSERT OR REPLACE INTO checkins (habit_id, day, completed, ts)
               VALUES (?1, ?2, ?3, ?4)"#,
            rusqlite::params![habit_id, day.to_string(), completed, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    /// Push the habit's fresh log to subscribers, if any
    fn publish(&self, habit_id: &str) -> Result<()> {
        if !self.feed.is_subscribed(habit_id) {
            self.feed.touch();
            return Ok(());
        }
        let log = HabitReader::new(self.db.clone()).log(habit_id)?;
        debug!(habit_id, entries = log.len(), "Publishing snapshot");
        self.feed.publish(habit_id, log);
        Ok(())
    }
}
