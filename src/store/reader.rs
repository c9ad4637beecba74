//! Habit and check-in reads

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use super::db::StoreDb;
use crate::domain::{CheckinLog, Habit, HabitSnapshot, Schedule};
use crate::stats::DateKey;

/// Which habits a listing includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HabitFilter {
    #[default]
    Active,
    Archived,
    All,
}

impl HabitFilter {
    fn where_clause(&self) -> &'static str {
        match self {
            Self::Active => "AND archived = 0",
            Self::Archived => "AND archived = 1",
            Self::All => "",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Archived => "Archived",
            Self::All => "All",
        }
    }
}

type HabitRow = (String, String, String, String, bool, i64);

const HABIT_COLUMNS: &str = "id, name, target_days, start_date, archived, created_at";

fn habit_from_row(row: HabitRow) -> Result<Habit> {
    let (id, name, target_days, start_date, archived, created_at) = row;
    let Some(schedule) = Schedule::parse(&target_days) else {
        bail!("Habit {} has invalid target days '{}'", id, target_days);
    };
    let start_date = DateKey::parse(&start_date)
        .with_context(|| format!("Habit {} has an invalid start date", id))?;
    Ok(Habit {
        id,
        name,
        schedule,
        start_date,
        archived,
        created_at,
    })
}

/// Reads habits and their check-in logs
#[derive(Clone)]
pub struct HabitReader {
    db: StoreDb,
}

impl HabitReader {
    pub fn new(db: StoreDb) -> Self {
        Self { db }
    }

    /// A user's habits, newest first
    pub fn habits(&self, user: &str, filter: HabitFilter) -> Result<Vec<Habit>> {
        let conn = self.db.conn();
        let sql = format!(
            "SELECT {} FROM habits WHERE user_id = ?1 {} ORDER BY created_at DESC, rowid DESC",
            HABIT_COLUMNS,
            filter.where_clause()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows: Vec<HabitRow> = stmt
            .query_map([user], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?))
            })?
            .collect::<rusqlite::Result<_>>()?;
        rows.into_iter().map(habit_from_row).collect()
    }

    pub fn habit(&self, id: &str) -> Result<Option<Habit>> {
        let conn = self.db.conn();
        Self::habit_with(&conn, id)
    }

    pub(super) fn habit_with(conn: &Connection, id: &str) -> Result<Option<Habit>> {
        let sql = format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS);
        let row: Option<HabitRow> = conn
            .query_row(&sql, [id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?))
            })
            .optional()?;
        row.map(habit_from_row).transpose()
    }

    /// Find one of the user's habits by full id or unique id prefix
    pub fn resolve(&self, user: &str, id_or_prefix: &str) -> Result<Habit> {
        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            bail!("Habit id must not be empty");
        }
        let mut matches: Vec<Habit> = self
            .habits(user, HabitFilter::All)?
            .into_iter()
            .filter(|h| h.id.starts_with(needle))
            .collect();
        if let Some(exact) = matches.iter().position(|h| h.id == needle) {
            return Ok(matches.swap_remove(exact));
        }
        match matches.len() {
            0 => bail!("No habit matches '{}'", needle),
            1 => Ok(matches.remove(0)),
            n => bail!("'{}' is ambiguous ({} habits match)", needle, n),
        }
    }

    /// The habit's full check-in log
    pub fn log(&self, habit_id: &str) -> Result<CheckinLog> {
        let conn = self.db.conn();
        Self::log_with(&conn, habit_id)
    }

    pub(super) fn log_with(conn: &Connection, habit_id: &str) -> Result<CheckinLog> {
        let mut stmt = conn.prepare("SELECT day, completed FROM checkins WHERE habit_id = ?1")?;
        let rows: Vec<(String, bool)> = stmt
            .query_map([habit_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<_>>()?;
        let log = CheckinLog::from_raw(rows)
            .with_context(|| format!("Corrupt check-in log for habit {}", habit_id))?;
        debug!(habit_id, entries = log.len(), "Loaded check-in log");
        Ok(log)
    }

    /// Each matching habit with a copy of its log
    pub fn snapshot(&self, user: &str, filter: HabitFilter) -> Result<Vec<HabitSnapshot>> {
        let habits = self.habits(user, filter)?;
        let conn = self.db.conn();
        habits
            .into_iter()
            .map(|habit| {
                let log = Self::log_with(&conn, &habit.id)?;
                Ok(HabitSnapshot { habit, log })
            })
            .collect()
    }
}
