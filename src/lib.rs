//! habitline - daily habit check-ins, streaks and completion analytics
//!
//! Habits have a set of target weekdays and a log of daily check-ins. From
//! those two inputs habitline derives everything it shows: current and best
//! streaks, per-day and per-habit completion over a trailing week or month,
//! and a calendar heatmap.
//!
//! ## Layout
//!
//! - [`domain`]: habits, schedules and check-in logs
//! - [`stats`]: the pure aggregation engine and the view models built on it
//! - [`store`]: SQLite persistence and the live snapshot feed
//! - [`config`]: `~/.habitline/config.toml`

pub mod config;
pub mod domain;
pub mod error;
pub mod stats;
pub mod store;

pub use domain::*;
pub use error::StatsError;
