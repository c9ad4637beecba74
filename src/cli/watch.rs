//! Watch command: live dashboard driven by the snapshot feed

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::signal;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use habitline::domain::{CheckinLog, HabitSnapshot};
use habitline::stats::build_dashboard;
use habitline::store::{HabitFilter, HabitStore};

use super::ViewContext;
use super::report::render_dashboard;

/// Redraw the dashboard whenever a check-in changes, here or in another process
pub async fn watch_command(store: &HabitStore, ctx: &ViewContext, poll_ms: u64) -> Result<()> {
    let mut live = LiveDashboard::default();
    let mut revisions = store.feed().revisions();
    render(&live.refresh(store, &ctx.user)?, ctx)?;

    let mut ticker = tokio::time::interval(Duration::from_millis(poll_ms.max(50)));
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!(poll_ms, "Watching for check-ins");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = store.poll_changes() {
                    warn!(error = %e, "Failed to poll for changes");
                }
            }
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                debug!(revision = *revisions.borrow_and_update(), "Feed revision");
                render(&live.refresh(store, &ctx.user)?, ctx)?;
            }
            _ = &mut ctrl_c => {
                info!("Shutdown signal received");
                break;
            }
        }
    }
    Ok(())
}

/// One feed receiver per active habit.
///
/// Habit records come from the store; logs come from the latest snapshot
/// each receiver holds.
#[derive(Default)]
struct LiveDashboard {
    receivers: HashMap<String, watch::Receiver<Arc<CheckinLog>>>,
}

impl LiveDashboard {
    /// Sync receivers with the active habit list and pair each habit with its snapshot
    fn refresh(&mut self, store: &HabitStore, user: &str) -> Result<Vec<HabitSnapshot>> {
        let habits = store.reader().habits(user, HabitFilter::Active)?;
        self.receivers.retain(|id, _| habits.iter().any(|h| &h.id == id));

        let mut snapshots = Vec::with_capacity(habits.len());
        for habit in habits {
            if !self.receivers.contains_key(&habit.id) {
                let receiver = store.subscribe(&habit.id)?;
                self.receivers.insert(habit.id.clone(), receiver);
            }
            let log = match self.receivers.get_mut(&habit.id) {
                Some(receiver) => CheckinLog::clone(&receiver.borrow_and_update()),
                None => CheckinLog::new(),
            };
            snapshots.push(HabitSnapshot { habit, log });
        }
        Ok(snapshots)
    }
}

fn render(snapshots: &[HabitSnapshot], ctx: &ViewContext) -> Result<()> {
    let summary = build_dashboard(snapshots, ctx.today());
    if ctx.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        // Clear screen and home the cursor
        print!("\x1b[2J\x1b[H{}", render_dashboard(&summary));
    }
    Ok(())
}
