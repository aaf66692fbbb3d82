use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One logged exercise with its duration and optional metrics.
/// Owned by the `DailyLog` it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    /// Empty when the stored entry carried none.
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "any_scalar_text")]
    pub id: String,
    pub name: String,
    /// NaN when missing or not a JSON number, so validation reports it.
    #[serde(
        default = "not_a_number",
        serialize_with = "whole_number",
        deserialize_with = "strict_number"
    )]
    pub duration_minutes: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "opt_whole_number",
        deserialize_with = "loose_number"
    )]
    pub sets: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "opt_whole_number",
        deserialize_with = "loose_number"
    )]
    pub reps: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "opt_whole_number",
        deserialize_with = "loose_number"
    )]
    pub distance_km: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "opt_whole_number",
        deserialize_with = "loose_number"
    )]
    pub calories: Option<f64>,
}

fn not_a_number() -> f64 {
    f64::NAN
}

// Ids are opaque; numbers and booleans are kept as their text form.
fn any_scalar_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn strict_number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(d)?.as_f64().unwrap_or(f64::NAN))
}

// Optional metrics: null is absent, numeric text is read as its number and
// anything else becomes NaN, which is neither negative nor valid data.
fn loose_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.trim().parse().unwrap_or(f64::NAN)),
        _ => Some(f64::NAN),
    })
}

// Integral values are written without a fraction (`30`, not `30.0`) so exported
// files read the same as hand-written ones.
fn whole_number<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        s.serialize_i64(*value as i64)
    } else {
        s.serialize_f64(*value)
    }
}

fn opt_whole_number<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => whole_number(v, s),
        None => s.serialize_none(),
    }
}

impl ExerciseEntry {
    /// Builds an entry with a fresh random id and no optional metrics.
    pub fn new(name: impl Into<String>, duration_minutes: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            duration_minutes,
            sets: None,
            reps: None,
            distance_km: None,
            calories: None,
        }
    }

    /// Key used to bucket entries in a breakdown, so "Run" and " run " collapse.
    pub fn breakdown_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// All exercises logged for one calendar day.
/// `date` is the natural key of a collection and is kept as `YYYY-MM-DD` text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: String,
    pub exercises: Vec<ExerciseEntry>,
}

impl DailyLog {
    pub fn new(date: impl Into<String>, exercises: Vec<ExerciseEntry>) -> Self {
        Self {
            date: date.into(),
            exercises,
        }
    }

    pub fn total_minutes(&self) -> f64 {
        self.exercises.iter().map(|e| e.duration_minutes).sum()
    }
}

/// Aggregated totals for a day, week or month.
///
/// `average_minutes_per_day` is only set by the weekly and monthly views.
/// The monthly view stores the mean per-week total there, not a per-day value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_minutes: f64,
    pub total_exercises: usize,
    pub breakdown_by_exercise: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_minutes_per_day: Option<f64>,
}

impl SummaryStats {
    /// Breakdown rows ordered by minutes (highest first), then by name.
    pub fn sorted_breakdown(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self
            .breakdown_by_exercise
            .iter()
            .map(|(name, minutes)| (name.as_str(), *minutes))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub total_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendInsights {
    pub longest_streak_days: u32,
    pub most_active_day: Option<String>,
    pub weekly_growth_percentage: f64,
}

/// Result of an import attempt. Failures leave the stored collection untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
}

impl ImportOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
