use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{DailyLog, ExerciseEntry};

static DATE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is a valid regex")
});

/// Returns every problem with `entry`; an empty vector means the entry is valid.
pub fn validate_exercise(entry: &ExerciseEntry) -> Vec<String> {
    let mut errors = Vec::new();

    if entry.name.trim().is_empty() {
        errors.push("Exercise name is required.".to_string());
    }
    if !entry.duration_minutes.is_finite() || entry.duration_minutes <= 0.0 {
        errors.push("Duration must be a positive number.".to_string());
    }

    let optionals = [
        (entry.sets, "Sets"),
        (entry.reps, "Reps"),
        (entry.distance_km, "Distance"),
        (entry.calories, "Calories"),
    ];
    for (value, label) in optionals {
        if matches!(value, Some(v) if v < 0.0) {
            errors.push(format!("{label} cannot be negative."));
        }
    }

    errors
}

/// Checks the date format, that at least one exercise is present, and each
/// exercise in order. Exercise errors are prefixed with their 1-based position.
pub fn validate_daily_log(log: &DailyLog) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_canonical_date(&log.date) {
        errors.push("Date must be formatted as YYYY-MM-DD.".to_string());
    }
    if log.exercises.is_empty() {
        errors.push("Add at least one exercise entry.".to_string());
    }

    for (idx, entry) in log.exercises.iter().enumerate() {
        for error in validate_exercise(entry) {
            errors.push(format!("Exercise {}: {}", idx + 1, error));
        }
    }

    errors
}

/// `true` when `date` has the `YYYY-MM-DD` shape. Field ranges are not checked.
pub fn is_canonical_date(date: &str) -> bool {
    DATE_FORMAT.is_match(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, minutes: f64) -> ExerciseEntry {
        ExerciseEntry {
            id: "1".into(),
            name: name.into(),
            duration_minutes: minutes,
            sets: None,
            reps: None,
            distance_km: None,
            calories: None,
        }
    }

    #[test]
    fn valid_entry_has_no_errors() {
        let mut e = entry("Run", 30.0);
        e.sets = Some(0.0);
        e.distance_km = Some(5.2);
        assert!(validate_exercise(&e).is_empty());
    }

    #[test]
    fn blank_name_and_bad_duration_are_reported() {
        let errors = validate_exercise(&entry("   ", 0.0));
        assert_eq!(
            errors,
            vec![
                "Exercise name is required.".to_string(),
                "Duration must be a positive number.".to_string(),
            ]
        );

        assert_eq!(validate_exercise(&entry("Run", f64::NAN)).len(), 1);
        assert_eq!(validate_exercise(&entry("Run", f64::INFINITY)).len(), 1);
        assert_eq!(validate_exercise(&entry("Run", -5.0)).len(), 1);
    }

    #[test]
    fn negative_optionals_are_reported_in_field_order() {
        let mut e = entry("Row", 10.0);
        e.sets = Some(-1.0);
        e.reps = Some(-1.0);
        e.distance_km = Some(-0.5);
        e.calories = Some(-100.0);
        assert_eq!(
            validate_exercise(&e),
            vec![
                "Sets cannot be negative.",
                "Reps cannot be negative.",
                "Distance cannot be negative.",
                "Calories cannot be negative.",
            ]
        );
    }

    #[test]
    fn daily_log_errors_are_ordered_and_prefixed() {
        let log = DailyLog::new("2026/02/09", vec![entry("Run", 10.0), entry("", -1.0)]);
        assert_eq!(
            validate_daily_log(&log),
            vec![
                "Date must be formatted as YYYY-MM-DD.",
                "Exercise 2: Exercise name is required.",
                "Exercise 2: Duration must be a positive number.",
            ]
        );
    }

    #[test]
    fn empty_day_is_rejected() {
        let log = DailyLog::new("2026-02-09", Vec::new());
        assert_eq!(validate_daily_log(&log), vec!["Add at least one exercise entry."]);
    }

    #[test]
    fn date_shape_only() {
        assert!(is_canonical_date("2026-02-09"));
        assert!(is_canonical_date("2026-13-45"));
        assert!(!is_canonical_date("26-02-09"));
        assert!(!is_canonical_date("2026-2-9"));
        assert!(!is_canonical_date(" 2026-02-09"));
    }
}
