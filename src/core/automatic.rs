//! Automatic habit evaluation from daily health metrics.
//!
//! Habits flagged as automatic are not checked off by hand: once a day the
//! evaluator asks the health provider for that day's metrics, applies each
//! habit's rule, and records the outcome through the regular entry upsert.
//! Indeterminate data writes nothing at all, so a habit with no usable
//! metric keeps whatever entry state it already had and is never forced to
//! "not completed". One failing habit is logged and skipped; the rest of the
//! sweep continues.

use crate::{
    core::daily_log,
    entities::{AutomaticRule, Habit, HabitKind},
    errors::Result,
    store::Store,
};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Daily step count needed to complete a step-target habit.
pub const DAILY_STEP_TARGET: u64 = 10_000;

/// Point-in-time health metrics for a single day.
///
/// Every field is optional: providers report only what the platform actually
/// recorded, and an absent metric is indeterminate rather than zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthSnapshot {
    /// Steps walked during the day, if the platform recorded any
    pub steps: Option<u64>,
}

/// Source of daily health metrics consulted by the evaluator.
///
/// The real implementation wraps the device's health platform; tests use
/// fixed in-memory snapshots.
#[allow(async_fn_in_trait)]
pub trait HealthMetricProvider {
    /// Fetches the metric snapshot recorded for `date`.
    ///
    /// `Ok(None)` means the platform has no data at all for that day, which
    /// the evaluator treats as indeterminate for every rule.
    ///
    /// # Errors
    /// Provider-specific transport or parse failures.
    async fn fetch(&self, date: NaiveDate) -> Result<Option<HealthSnapshot>>;
}

/// What the evaluator decided for a single habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// A definite result was written to the daily log
    Recorded {
        /// Whether the habit counted as completed
        completed: bool,
    },
    /// No usable metric was available; nothing was written
    Indeterminate,
    /// The provider or the store failed for this habit
    Failed {
        /// Rendered failure description for the summary
        message: String,
    },
}

/// Evaluation result for one automatic habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitCheckResult {
    /// Name of the habit that was evaluated
    pub habit_name: String,
    /// What happened for this habit
    pub outcome: CheckOutcome,
}

/// Result of one evaluator sweep across the automatic habits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    /// Per-habit outcomes in processing order
    pub results: Vec<HabitCheckResult>,
    /// Habits recorded as completed
    pub completed_count: usize,
    /// Habits recorded as not completed
    pub not_completed_count: usize,
    /// Habits left untouched for lack of data
    pub indeterminate_count: usize,
    /// Habits that failed to evaluate or record
    pub failed_count: usize,
    /// Date the sweep evaluated
    pub check_date: NaiveDate,
}

/// Evaluates every automatic habit in `habits` for `date`.
///
/// Habits whose kind is not automatic are skipped. The rest are processed
/// sequentially: a definite rule result is written through the entry upsert,
/// indeterminate data writes nothing, and a failure for one habit is logged
/// without stopping the sweep. The returned summary lists every evaluated
/// habit.
pub async fn check_automatic_habits<P>(
    store: &Store,
    provider: &P,
    date: NaiveDate,
    habits: &[Habit],
) -> CheckSummary
where
    P: HealthMetricProvider,
{
    let mut results = Vec::new();
    let mut completed_count = 0;
    let mut not_completed_count = 0;
    let mut indeterminate_count = 0;
    let mut failed_count = 0;

    for habit in habits {
        let HabitKind::Automatic(rule) = habit.kind else {
            continue;
        };

        let outcome = match evaluate_rule(provider, rule, date).await {
            Ok(Some(completed)) => {
                match daily_log::update_habit_entry(store, date, &habit.id, completed, None, None)
                    .await
                {
                    Ok(_) => {
                        if completed {
                            completed_count += 1;
                        } else {
                            not_completed_count += 1;
                        }
                        CheckOutcome::Recorded { completed }
                    }
                    Err(e) => {
                        warn!("Failed to record automatic result for '{}': {e}", habit.name);
                        failed_count += 1;
                        CheckOutcome::Failed {
                            message: e.to_string(),
                        }
                    }
                }
            }
            Ok(None) => {
                debug!(
                    "No usable metric for '{}' on {date}, leaving its entry untouched",
                    habit.name
                );
                indeterminate_count += 1;
                CheckOutcome::Indeterminate
            }
            Err(e) => {
                warn!("Health provider failed for '{}': {e}", habit.name);
                failed_count += 1;
                CheckOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        results.push(HabitCheckResult {
            habit_name: habit.name.clone(),
            outcome,
        });
    }

    info!(
        "Automatic check for {date}: {} recorded, {} indeterminate, {} failed",
        completed_count + not_completed_count,
        indeterminate_count,
        failed_count
    );

    CheckSummary {
        results,
        completed_count,
        not_completed_count,
        indeterminate_count,
        failed_count,
        check_date: date,
    }
}

/// Evaluates one rule for one date.
///
/// `Ok(Some(_))` is a definite result, `Ok(None)` indeterminate. The step
/// target rule completes at [`DAILY_STEP_TARGET`] steps; a snapshot without
/// a step count stays indeterminate even when other metrics are present.
async fn evaluate_rule<P>(
    provider: &P,
    rule: AutomaticRule,
    date: NaiveDate,
) -> Result<Option<bool>>
where
    P: HealthMetricProvider,
{
    match rule {
        AutomaticRule::StepTarget => {
            let Some(snapshot) = provider.fetch(date).await? else {
                return Ok(None);
            };
            Ok(snapshot.steps.map(|steps| steps >= DAILY_STEP_TARGET))
        }
    }
}

/// Formats a check summary into a human-readable multi-line string for the
/// runner's log.
#[must_use]
pub fn format_check_summary(summary: &CheckSummary) -> String {
    use std::fmt::Write;

    let mut text = format!(
        "Automatic check - {} - {} habits evaluated\n",
        summary.check_date.format("%Y-%m-%d"),
        summary.results.len()
    );

    // write! is infallible when writing to String, so unwrap is safe
    writeln!(
        text,
        "  Completed: {} | Not completed: {} | No data: {} | Failed: {}",
        summary.completed_count,
        summary.not_completed_count,
        summary.indeterminate_count,
        summary.failed_count
    )
    .unwrap();
    writeln!(text).unwrap();

    for result in &summary.results {
        let status = match &result.outcome {
            CheckOutcome::Recorded { completed: true } => "completed".to_string(),
            CheckOutcome::Recorded { completed: false } => "not completed".to_string(),
            CheckOutcome::Indeterminate => "no data".to_string(),
            CheckOutcome::Failed { message } => format!("failed: {message}"),
        };
        writeln!(text, "  {} - {}", result.habit_name, status).unwrap();
    }

    text
}
