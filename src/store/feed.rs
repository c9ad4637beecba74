//! Live snapshot feed
//!
//! Every write that touches a habit's check-ins pushes a fresh immutable log
//! snapshot to that habit's subscribers. Subscribers recompute whatever they
//! derive from scratch; nothing is patched incrementally.
//!
//! A global revision counter ticks on every change so a view that shows
//! many habits (the dashboard) can wait on a single channel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::debug;

use crate::domain::CheckinLog;

struct FeedState {
    habits: HashMap<String, watch::Sender<Arc<CheckinLog>>>,
    revision: watch::Sender<u64>,
}

/// Publish/subscribe hub for check-in log snapshots
#[derive(Clone)]
pub struct SnapshotFeed {
    state: Arc<Mutex<FeedState>>,
}

impl Default for SnapshotFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotFeed {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(FeedState {
                habits: HashMap::new(),
                revision,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribe to a habit's log.
    ///
    /// `current` seeds the channel when this is the first subscriber; later
    /// subscribers see the latest published snapshot instead.
    pub fn subscribe(&self, habit_id: &str, current: CheckinLog) -> watch::Receiver<Arc<CheckinLog>> {
        let mut state = self.state();
        if let Some(sender) = state.habits.get(habit_id) {
            return sender.subscribe();
        }
        let (sender, receiver) = watch::channel(Arc::new(current));
        state.habits.insert(habit_id.to_string(), sender);
        debug!(habit_id, "Opened snapshot channel");
        receiver
    }

    /// Receiver that changes whenever any habit changes
    pub fn revisions(&self) -> watch::Receiver<u64> {
        self.state().revision.subscribe()
    }

    pub fn is_subscribed(&self, habit_id: &str) -> bool {
        self.state().habits.contains_key(habit_id)
    }

    /// Ids of habits with an open channel
    pub fn subscribed(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state().habits.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Push a new snapshot for one habit. No-op for the habit channel when
    /// nobody subscribed, but the revision still advances.
    pub fn publish(&self, habit_id: &str, log: CheckinLog) {
        let state = self.state();
        if let Some(sender) = state.habits.get(habit_id) {
            sender.send_replace(Arc::new(log));
            debug!(habit_id, "Published log snapshot");
        }
        state.revision.send_modify(|rev| *rev += 1);
    }

    /// Advance the revision without a habit snapshot (habit list changed)
    pub fn touch(&self) {
        self.state().revision.send_modify(|rev| *rev += 1);
    }

    /// Drop a habit's channel. Its receivers observe the sender closing.
    pub fn close(&self, habit_id: &str) {
        let mut state = self.state();
        if state.habits.remove(habit_id).is_some() {
            debug!(habit_id, "Closed snapshot channel");
        }
        state.revision.send_modify(|rev| *rev += 1);
    }
}
