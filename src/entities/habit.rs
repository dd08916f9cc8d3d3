//! Habit entity - Represents a tracked habit and its configuration.
//!
//! Each habit has a name, completion kind, display color, and lifecycle
//! metadata. Weather fields ride along for the notification layer and are
//! never interpreted by the core. The persisted layout keeps the legacy
//! optional `type`/`automaticType` string pair, so stores written by earlier
//! app versions load unchanged.

use crate::entities::normalize;
use serde::{Deserialize, Serialize};

/// How completion for a habit is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitKind {
    /// Plain yes/no habit checked off by hand
    Simple,
    /// Habit tracked with a numeric amount (reps, pages, glasses)
    Quantity,
    /// Habit completed automatically from health-platform data
    Automatic(AutomaticRule),
}

/// Rule an automatic habit is evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomaticRule {
    /// Completed when the daily step count reaches the step target
    StepTarget,
}

/// Habit data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HabitRecord", into = "HabitRecord")]
pub struct Habit {
    /// Unique identifier, issued by the repository at creation and immutable
    pub id: String,
    /// Human-readable name shown in lists and prompts
    pub name: String,
    /// How completion for this habit is determined
    pub kind: HabitKind,
    /// Display color token, opaque to the core
    pub color: String,
    /// ISO timestamp of creation, immutable
    pub created_at: String,
    /// Archived habits keep their history but leave active lists
    pub archived: bool,
    /// Whether the notification layer weather-gates this habit
    pub weather_dependent: bool,
    /// Weather types under which the habit applies (interpreted upstream)
    pub required_weather_types: Vec<String>,
    /// Fallback habit suggested when the weather gate fails
    pub backup_habit_name: Option<String>,
}

impl Habit {
    /// Returns the automatic rule for this habit, or `None` when it is
    /// checked off by hand.
    #[must_use]
    pub const fn automatic_rule(&self) -> Option<AutomaticRule> {
        match self.kind {
            HabitKind::Automatic(rule) => Some(rule),
            HabitKind::Simple | HabitKind::Quantity => None,
        }
    }
}

/// Persisted habit layout, kept compatible with stores written before the
/// kind became an explicit enum: a plain habit omits `type`, a quantity habit
/// stores `"quantity"`, and an automatic habit stores `"automatic"` plus the
/// rule name in `automaticType`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HabitRecord {
    id: String,
    name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    automatic_type: Option<String>,
    #[serde(default)]
    color: String,
    #[serde(default)]
    created_at: String,
    #[serde(default, deserialize_with = "normalize::deserialize_loose_bool")]
    archived: bool,
    #[serde(default, deserialize_with = "normalize::deserialize_loose_bool")]
    weather_dependent: bool,
    #[serde(default)]
    required_weather_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backup_habit_name: Option<String>,
}

impl From<HabitRecord> for Habit {
    fn from(record: HabitRecord) -> Self {
        // An automatic habit with a rule this version does not know loads as
        // a plain habit instead of evaluating under the wrong rule.
        let kind = match record.kind.as_deref() {
            Some("automatic") => match record.automatic_type.as_deref() {
                Some("stepTarget") => HabitKind::Automatic(AutomaticRule::StepTarget),
                _ => HabitKind::Simple,
            },
            Some("quantity") => HabitKind::Quantity,
            _ => HabitKind::Simple,
        };

        Self {
            id: record.id,
            name: record.name,
            kind,
            color: record.color,
            created_at: record.created_at,
            archived: record.archived,
            weather_dependent: record.weather_dependent,
            required_weather_types: record.required_weather_types,
            backup_habit_name: record.backup_habit_name,
        }
    }
}

impl From<Habit> for HabitRecord {
    fn from(habit: Habit) -> Self {
        let (kind, automatic_type) = match habit.kind {
            HabitKind::Simple => (None, None),
            HabitKind::Quantity => (Some("quantity".to_string()), None),
            HabitKind::Automatic(AutomaticRule::StepTarget) => {
                (Some("automatic".to_string()), Some("stepTarget".to_string()))
            }
        };

        Self {
            id: habit.id,
            name: habit.name,
            kind,
            automatic_type,
            color: habit.color,
            created_at: habit.created_at,
            archived: habit.archived,
            weather_dependent: habit.weather_dependent,
            required_weather_types: habit.required_weather_types,
            backup_habit_name: habit.backup_habit_name,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    fn sample_habit(kind: HabitKind) -> Habit {
        Habit {
            id: "habit-1".to_string(),
            name: "Stretch".to_string(),
            kind,
            color: "#7bd389".to_string(),
            created_at: "2024-03-01T08:30:00+00:00".to_string(),
            archived: false,
            weather_dependent: false,
            required_weather_types: Vec::new(),
            backup_habit_name: None,
        }
    }

    #[test]
    fn test_simple_habit_omits_type_keys() {
        let value = serde_json::to_value(sample_habit(HabitKind::Simple)).unwrap();

        assert!(value.get("type").is_none());
        assert!(value.get("automaticType").is_none());
        assert_eq!(value["name"], json!("Stretch"));
        assert_eq!(value["createdAt"], json!("2024-03-01T08:30:00+00:00"));
    }

    #[test]
    fn test_quantity_habit_round_trip() {
        let habit = sample_habit(HabitKind::Quantity);
        let value = serde_json::to_value(habit.clone()).unwrap();
        assert_eq!(value["type"], json!("quantity"));
        assert!(value.get("automaticType").is_none());

        let back: Habit = serde_json::from_value(value).unwrap();
        assert_eq!(back, habit);
    }

    #[test]
    fn test_automatic_habit_round_trip() {
        let habit = sample_habit(HabitKind::Automatic(AutomaticRule::StepTarget));
        let value = serde_json::to_value(habit.clone()).unwrap();
        assert_eq!(value["type"], json!("automatic"));
        assert_eq!(value["automaticType"], json!("stepTarget"));

        let back: Habit = serde_json::from_value(value).unwrap();
        assert_eq!(back, habit);
        assert_eq!(back.automatic_rule(), Some(AutomaticRule::StepTarget));
    }

    #[test]
    fn test_legacy_record_with_string_booleans() {
        let raw = json!({
            "id": "legacy-1",
            "name": "Old habit",
            "type": "automatic",
            "automaticType": "stepTarget",
            "createdAt": "2022-11-05T07:00:00.000Z",
            "archived": "true",
            "weatherDependent": "false"
        });

        let habit: Habit = serde_json::from_value(raw).unwrap();
        assert_eq!(habit.kind, HabitKind::Automatic(AutomaticRule::StepTarget));
        assert!(habit.archived);
        assert!(!habit.weather_dependent);
        // Fields the legacy record never wrote come back as defaults
        assert_eq!(habit.color, "");
        assert!(habit.required_weather_types.is_empty());
        assert!(habit.backup_habit_name.is_none());
    }

    #[test]
    fn test_unknown_automatic_rule_loads_as_simple() {
        let raw = json!({
            "id": "legacy-2",
            "name": "Mystery",
            "type": "automatic",
            "automaticType": "heartRateZone",
            "createdAt": "2023-01-01T00:00:00.000Z"
        });

        let habit: Habit = serde_json::from_value(raw).unwrap();
        assert_eq!(habit.kind, HabitKind::Simple);
        assert!(habit.automatic_rule().is_none());
    }

    #[test]
    fn test_missing_type_loads_as_simple() {
        let raw = json!({
            "id": "legacy-3",
            "name": "Plain",
            "createdAt": "2023-06-01T00:00:00.000Z"
        });

        let habit: Habit = serde_json::from_value(raw).unwrap();
        assert_eq!(habit.kind, HabitKind::Simple);
        assert!(!habit.archived);
    }
}
