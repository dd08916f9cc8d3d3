//! Habit statistics - streaks and aggregate counts derived from the logs.
//!
//! Everything here treats "a date with an entry" as the unit of progress:
//! streaks count consecutive calendar dates that have an entry for the habit,
//! whatever the entry's completed flag says. The current streak is anchored
//! at the most recent entry date rather than today, so looking at a habit
//! that was dropped weeks ago shows the streak it ended with instead of zero.

use crate::{core::daily_log, entities::HabitEntry, store::Store};
use chrono::{Days, NaiveDate};
use std::collections::HashSet;

/// Aggregate statistics for one habit, derived on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HabitStats {
    /// Number of distinct dates with an entry for the habit
    pub total_days: u32,
    /// Number of distinct dates with an entry marked completed
    pub completed_days: u32,
    /// `completed_days / total_days`, 0.0 when there are no entries
    pub completion_rate: f64,
    /// Consecutive entry dates ending at the most recent entry
    pub current_streak: u32,
    /// Longest run of consecutive entry dates anywhere in the history
    pub longest_streak: u32,
    /// Date of the most recent entry, whatever its completed flag
    pub last_completed_date: Option<NaiveDate>,
}

/// Computes statistics for `habit_id` across the whole store.
///
/// A habit with no entries, an unknown id, or an unreadable log collection
/// all yield the zeroed default rather than an error.
pub async fn calculate_habit_stats(store: &Store, habit_id: &str) -> HabitStats {
    let entries = daily_log::get_entries_for_habit(store, habit_id).await;
    stats_from_entries(&entries)
}

/// Computes statistics from one habit's entries.
///
/// Streak rules:
/// - the current streak starts at the single most recent entry date and walks
///   backward one calendar day at a time while entries keep existing;
/// - the longest streak is the longest run of strictly consecutive dates
///   anywhere in the history;
/// - duplicate dates are collapsed before either walk and in both day
///   counts.
#[must_use]
pub fn stats_from_entries(entries: &[HabitEntry]) -> HabitStats {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|entry| entry.date).collect();
    dates.sort_unstable();
    dates.dedup();

    let Some(&most_recent) = dates.last() else {
        return HabitStats::default();
    };
    let date_set: HashSet<NaiveDate> = dates.iter().copied().collect();

    // Current streak: walk backward from the most recent entry date.
    let mut current_streak = 1u32;
    let mut cursor = most_recent;
    while let Some(previous) = cursor.checked_sub_days(Days::new(1)) {
        if !date_set.contains(&previous) {
            break;
        }
        current_streak += 1;
        cursor = previous;
    }

    // Longest streak: scan runs of consecutive dates in sorted order.
    let mut longest_streak = 1u32;
    let mut run = 1u32;
    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
        } else {
            run = 1;
        }
        longest_streak = longest_streak.max(run);
    }

    // Distinct dates here too, so the completion rate stays within 0..=1
    // even when an old store carries duplicate entries for a date.
    let completed_dates: HashSet<NaiveDate> = entries
        .iter()
        .filter(|entry| entry.completed)
        .map(|entry| entry.date)
        .collect();

    // Cast safety: a habit history is bounded by days since creation, far
    // below u32::MAX.
    #[allow(clippy::cast_possible_truncation)]
    let (total_days, completed_days) = (dates.len() as u32, completed_dates.len() as u32);

    let completion_rate = if total_days == 0 {
        0.0
    } else {
        f64::from(completed_days) / f64::from(total_days)
    };

    HabitStats {
        total_days,
        completed_days,
        completion_rate,
        current_streak,
        longest_streak,
        last_completed_date: Some(most_recent),
    }
}
