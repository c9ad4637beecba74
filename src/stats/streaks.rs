//! Streak calculation
//!
//! Streaks count consecutive calendar days with a completed check-in. They
//! are never stored; every call recomputes from the log.
//!
//! Note that the habit's schedule is not consulted: a day off the schedule
//! with no check-in still breaks the current streak. Completion rates, by
//! contrast, only count scheduled days.

use serde::Serialize;

use super::date_key::{DateKey, day_difference};
use crate::domain::CheckinLog;

/// Current and best streak for one habit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
}

impl StreakInfo {
    pub fn compute(log: &CheckinLog, as_of: DateKey) -> Self {
        Self {
            current: current_streak(log, as_of),
            best: longest_streak(log),
        }
    }

    /// True when the streak reaches `as_of`
    pub fn is_active(&self) -> bool {
        self.current > 0
    }
}

/// Consecutive completed days ending at `as_of` inclusive.
///
/// Zero when `as_of` itself is not completed. Runs in O(streak length).
pub fn current_streak(log: &CheckinLog, as_of: DateKey) -> u32 {
    let mut streak = 0;
    let mut day = Some(as_of);
    while let Some(d) = day {
        if !log.is_completed(d) {
            break;
        }
        streak += 1;
        day = d.pred();
    }
    streak
}

/// Longest run of consecutive completed days anywhere in the log.
pub fn longest_streak(log: &CheckinLog) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<DateKey> = None;

    for day in log.completed_days() {
        run = match prev {
            Some(p) if day_difference(day, p) == 1 => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Schedule;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn log(entries: &[(&str, bool)]) -> CheckinLog {
        CheckinLog::from_raw(entries.iter().copied()).unwrap()
    }

    /// Deterministic pseudo-random logs over a 60 day span
    fn sample_logs() -> Vec<CheckinLog> {
        let start = key("2024-12-01");
        let mut state: u32 = 0x2545_f491;
        (0..40)
            .map(|_| {
                (0..60)
                    .filter_map(|offset| {
                        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                        match (state >> 16) % 4 {
                            0 => None,
                            1 => Some((start.add_days(offset).unwrap(), false)),
                            _ => Some((start.add_days(offset).unwrap(), true)),
                        }
                    })
                    .collect::<CheckinLog>()
            })
            .collect()
    }

    #[test]
    fn test_scenario_broken_run() {
        let l = log(&[
            ("2025-01-01", true),
            ("2025-01-02", true),
            ("2025-01-03", false),
            ("2025-01-04", true),
        ]);
        assert_eq!(current_streak(&l, key("2025-01-04")), 1);
        assert_eq!(longest_streak(&l), 2);
    }

    #[test]
    fn test_empty_log() {
        let l = CheckinLog::new();
        assert_eq!(current_streak(&l, key("2025-01-04")), 0);
        assert_eq!(longest_streak(&l), 0);
        assert_eq!(StreakInfo::compute(&l, key("2025-01-04")), StreakInfo::default());
    }

    #[test]
    fn test_current_streak_zero_when_as_of_not_completed() {
        let l = log(&[("2025-01-02", true), ("2025-01-03", true), ("2025-01-04", false)]);
        assert_eq!(current_streak(&l, key("2025-01-04")), 0);
        assert_eq!(current_streak(&l, key("2025-01-05")), 0);
        assert_eq!(current_streak(&l, key("2025-01-03")), 2);
    }

    #[test]
    fn test_current_streak_crosses_month_and_year() {
        let l = log(&[
            ("2024-12-30", true),
            ("2024-12-31", true),
            ("2025-01-01", true),
        ]);
        assert_eq!(current_streak(&l, key("2025-01-01")), 3);
    }

    #[test]
    fn test_unscheduled_gap_breaks_current_streak() {
        // Mon-Fri habit, done every weekday around an untouched weekend
        let schedule = Schedule::weekdays();
        let l = log(&[
            ("2025-01-09", true), // Thu
            ("2025-01-10", true), // Fri
            ("2025-01-13", true), // Mon
        ]);
        assert!(!schedule.contains(key("2025-01-11").weekday()));
        assert_eq!(current_streak(&l, key("2025-01-13")), 1);
        assert_eq!(longest_streak(&l), 2);
    }

    #[test]
    fn test_longest_streak_ignores_false_entries() {
        let l = log(&[
            ("2025-01-01", true),
            ("2025-01-02", false),
            ("2025-01-03", true),
            ("2025-01-04", true),
            ("2025-01-05", true),
            ("2025-01-07", true),
        ]);
        assert_eq!(longest_streak(&l), 3);
    }

    #[test]
    fn test_longest_streak_order_invariant() {
        let forward = log(&[("2025-01-01", true), ("2025-01-02", true), ("2025-01-05", true)]);
        let reversed = log(&[("2025-01-05", true), ("2025-01-02", true), ("2025-01-01", true)]);
        assert_eq!(longest_streak(&forward), longest_streak(&reversed));
        assert_eq!(longest_streak(&forward), 2);
    }

    #[test]
    fn test_streak_properties_hold_for_sample_logs() {
        for l in sample_logs() {
            let best = longest_streak(&l);
            assert_eq!(best, longest_streak(&l.clone()));

            for offset in 0..62 {
                let as_of = key("2024-12-01").add_days(offset).unwrap();
                let current = current_streak(&l, as_of);
                assert!(current as usize <= l.completed_count());
                assert!(best >= current);
                assert_eq!(current == 0, !l.is_completed(as_of));
            }
        }
    }

    #[test]
    fn test_streak_info_active() {
        let l = log(&[("2025-01-03", true), ("2025-01-04", true)]);
        let info = StreakInfo::compute(&l, key("2025-01-04"));
        assert_eq!(info, StreakInfo { current: 2, best: 2 });
        assert!(info.is_active());
        assert!(!StreakInfo::compute(&l, key("2025-01-05")).is_active());
    }
}
