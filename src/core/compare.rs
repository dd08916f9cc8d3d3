//! Comparison chart data - a habit's history against an external metric.
//!
//! Puts a habit's per-day values and an external numeric series (steps,
//! minutes of daylight, anything the caller supplies) onto a common 0 to 1
//! scale so the chart layer can overlay them. Days with nothing recorded
//! stay `None` and are excluded from the scaling extremes, so sparse data
//! does not drag the whole series toward zero.

use crate::{
    core::daily_log,
    entities::{Habit, HabitKind},
    store::Store,
};
use chrono::{Days, NaiveDate};

/// One day in a comparison series.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPoint {
    /// Calendar date of the point
    pub date: NaiveDate,
    /// Habit value scaled to 0..=1, `None` when nothing was logged
    pub habit_value: Option<f64>,
    /// Metric value scaled to 0..=1, `None` when the metric is missing
    pub metric_value: Option<f64>,
}

/// Habit-versus-metric series over a date range, ready for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSeries {
    /// One point per day of the requested range, in date order
    pub points: Vec<ComparisonPoint>,
}

/// Builds the day-by-day comparison between `habit` and an external metric
/// over the inclusive `[start, end]` range.
///
/// Habit values come from the stored entries: quantity habits contribute
/// their recorded amount and everything else contributes 1.0 when completed
/// and 0.0 when not. `metric` supplies one optional raw value per day of the
/// range, in order; days past its end count as missing. Both sides are
/// min-max scaled to 0..=1 independently of each other.
pub async fn build_comparison_series(
    store: &Store,
    habit: &Habit,
    metric: &[Option<f64>],
    start: NaiveDate,
    end: NaiveDate,
) -> ComparisonSeries {
    let entries = daily_log::get_habit_entries_in_range(store, &habit.id, start, end).await;

    let mut dates = Vec::new();
    let mut habit_values = Vec::new();
    let mut metric_values = Vec::new();

    let mut cursor = start;
    let mut index = 0usize;
    while cursor <= end {
        let entry = entries.iter().find(|entry| entry.date == cursor);
        let habit_value = entry.map(|entry| match habit.kind {
            HabitKind::Quantity => entry.quantity.unwrap_or(0.0),
            HabitKind::Simple | HabitKind::Automatic(_) => {
                if entry.completed { 1.0 } else { 0.0 }
            }
        });

        dates.push(cursor);
        habit_values.push(habit_value);
        metric_values.push(metric.get(index).copied().flatten());

        index += 1;
        let Some(next) = cursor.checked_add_days(Days::new(1)) else {
            break;
        };
        cursor = next;
    }

    let habit_scaled = scale_unit(&habit_values);
    let metric_scaled = scale_unit(&metric_values);

    let points = dates
        .into_iter()
        .zip(habit_scaled.into_iter().zip(metric_scaled))
        .map(|(date, (habit_value, metric_value))| ComparisonPoint {
            date,
            habit_value,
            metric_value,
        })
        .collect();

    ComparisonSeries { points }
}

/// Min-max scales a sparse series onto 0..=1, leaving the gaps in place.
///
/// A constant series (max equals min) maps every present value to 1.0 so a
/// flat line still registers on the chart instead of collapsing to zero.
#[must_use]
pub fn scale_unit(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let present: Vec<f64> = values.iter().copied().flatten().collect();
    let Some(min) = present.iter().copied().reduce(f64::min) else {
        return values.to_vec();
    };
    let max = present.iter().copied().fold(min, f64::max);
    let span = max - min;

    values
        .iter()
        .map(|value| value.map(|v| if span == 0.0 { 1.0 } else { (v - min) / span }))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::daily_log::update_habit_entry;
    use crate::errors::Result;
    use crate::test_utils::*;

    #[test]
    fn test_scale_unit_spreads_values() {
        let scaled = scale_unit(&[Some(0.0), Some(5.0), Some(10.0)]);
        assert_eq!(scaled, vec![Some(0.0), Some(0.5), Some(1.0)]);
    }

    #[test]
    fn test_scale_unit_keeps_gaps() {
        let scaled = scale_unit(&[Some(2.0), None, Some(4.0)]);
        assert_eq!(scaled, vec![Some(0.0), None, Some(1.0)]);
    }

    #[test]
    fn test_scale_unit_constant_series_pins_to_one() {
        let scaled = scale_unit(&[Some(7.0), Some(7.0)]);
        assert_eq!(scaled, vec![Some(1.0), Some(1.0)]);
    }

    #[test]
    fn test_scale_unit_empty_and_all_missing() {
        assert!(scale_unit(&[]).is_empty());
        assert_eq!(scale_unit(&[None, None]), vec![None, None]);
    }

    #[tokio::test]
    async fn test_series_covers_every_day_of_range() -> Result<()> {
        let (_dir, store, habit) = setup_with_habit().await?;

        log_entry(&store, &habit.id, date(2024, 3, 2), true).await?;

        let series = build_comparison_series(
            &store,
            &habit,
            &[],
            date(2024, 3, 1),
            date(2024, 3, 4),
        )
        .await;

        assert_eq!(series.points.len(), 4);
        let dates: Vec<NaiveDate> = series.points.iter().map(|point| point.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 3, 1),
                date(2024, 3, 2),
                date(2024, 3, 3),
                date(2024, 3, 4)
            ]
        );

        // Only the logged day carries a habit value
        assert!(series.points[0].habit_value.is_none());
        assert!(series.points[1].habit_value.is_some());
        // No metric was supplied at all
        assert!(series.points.iter().all(|point| point.metric_value.is_none()));

        Ok(())
    }

    #[tokio::test]
    async fn test_quantity_habit_scales_amounts() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;
        let habit = create_custom_habit(&store, "Read", HabitKind::Quantity).await?;

        update_habit_entry(&store, date(2024, 3, 1), &habit.id, true, Some(10.0), None).await?;
        update_habit_entry(&store, date(2024, 3, 2), &habit.id, true, Some(20.0), None).await?;
        update_habit_entry(&store, date(2024, 3, 3), &habit.id, true, Some(30.0), None).await?;

        let series = build_comparison_series(
            &store,
            &habit,
            &[],
            date(2024, 3, 1),
            date(2024, 3, 3),
        )
        .await;

        assert_eq!(series.points[0].habit_value, Some(0.0));
        assert_eq!(series.points[1].habit_value, Some(0.5));
        assert_eq!(series.points[2].habit_value, Some(1.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_metric_series_scales_independently() -> Result<()> {
        let (_dir, store, habit) = setup_with_habit().await?;

        log_entry(&store, &habit.id, date(2024, 3, 1), true).await?;
        log_entry(&store, &habit.id, date(2024, 3, 2), true).await?;

        let metric = [Some(4_000.0), Some(12_000.0), None];
        let series = build_comparison_series(
            &store,
            &habit,
            &metric,
            date(2024, 3, 1),
            date(2024, 3, 3),
        )
        .await;

        assert_eq!(series.points[0].metric_value, Some(0.0));
        assert_eq!(series.points[1].metric_value, Some(1.0));
        assert!(series.points[2].metric_value.is_none());

        // A yes/no habit logged completed on both days is a constant series
        assert_eq!(series.points[0].habit_value, Some(1.0));
        assert_eq!(series.points[1].habit_value, Some(1.0));

        Ok(())
    }
}
