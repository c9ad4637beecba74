//! Habit and check-in storage
//!
//! Keeps each user's habits and their daily check-ins in a SQLite database
//! (`~/.habitline/habits.db`) and pushes log snapshots to live subscribers.
//!
//! # Usage
//!
//! ```ignore
//! let store = HabitStore::open_default()?;
//!
//! let habit = store.recorder().add_habit("local", NewHabit::new("Read 20 pages"))?;
//! store.recorder().toggle_checkin(&habit.id, stats::today())?;
//!
//! let mut updates = store.subscribe(&habit.id)?;
//! updates.changed().await?;
//! ```

mod db;
mod feed;
mod reader;
mod recorder;

pub use db::StoreDb;
pub use feed::SnapshotFeed;
pub use reader::{HabitFilter, HabitReader};
pub use recorder::HabitRecorder;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::Result;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::CheckinLog;

/// Entry point to the store: hands out recorders, readers and subscriptions
#[derive(Clone)]
pub struct HabitStore {
    db: StoreDb,
    feed: SnapshotFeed,
    seen_version: Arc<AtomicI64>,
}

impl HabitStore {
    /// Open the store at the default location
    pub fn open_default() -> Result<Self> {
        Self::from_db(StoreDb::open_default()?)
    }

    /// Open the store at a custom database path
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_db(StoreDb::open(path)?)
    }

    /// A throwaway in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Self::from_db(StoreDb::open_in_memory()?)
    }

    fn from_db(db: StoreDb) -> Result<Self> {
        let version = db.data_version()?;
        Ok(Self {
            db,
            feed: SnapshotFeed::new(),
            seen_version: Arc::new(AtomicI64::new(version)),
        })
    }

    pub fn recorder(&self) -> HabitRecorder {
        HabitRecorder::new(self.db.clone(), self.feed.clone())
    }

    pub fn reader(&self) -> HabitReader {
        HabitReader::new(self.db.clone())
    }

    pub fn feed(&self) -> &SnapshotFeed {
        &self.feed
    }

    /// Subscribe to a habit's log, seeded with its current contents
    pub fn subscribe(&self, habit_id: &str) -> Result<watch::Receiver<Arc<CheckinLog>>> {
        let current = self.reader().log(habit_id)?;
        Ok(self.feed.subscribe(habit_id, current))
    }

    /// Pick up commits made by other processes.
    ///
    /// Returns true (and republishes every subscribed habit) when the
    /// database changed since the last poll.
    pub fn poll_changes(&self) -> Result<bool> {
        let version = self.db.data_version()?;
        if self.seen_version.swap(version, Ordering::SeqCst) == version {
            return Ok(false);
        }

        debug!(version, "Database changed externally");
        let reader = self.reader();
        for habit_id in self.feed.subscribed() {
            match reader.habit(&habit_id)? {
                Some(_) => self.feed.publish(&habit_id, reader.log(&habit_id)?),
                None => self.feed.close(&habit_id),
            }
        }
        self.feed.touch();
        Ok(true)
    }
}
