//! Aggregations over a collection of daily logs.
//!
//! Every function here is pure: it reads the logs it is given and returns a
//! freshly computed value. Nothing is cached between calls.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use itertools::Itertools;
use tracing::debug;

use crate::{
    date::{DateRange, parse_date, week_label},
    models::{DailyLog, ExerciseEntry, SummaryStats, TrendInsights, TrendPoint},
};

/// Rounds the exact binary value to one decimal place.
///
/// `12.35` is stored as `12.3499…` and rounds down. Only values sitting
/// exactly halfway (`26.75`) round away from zero.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value * 10.0;
    // Residual of the multiplication; zero when `scaled` is exact.
    let residual = value.mul_add(10.0, -scaled);
    if residual == 0.0 && scaled.fract().abs() == 0.5 {
        return scaled.round() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Sums minutes, counts entries and builds the per-name breakdown across
/// every exercise of every log given.
pub fn create_summary(logs: &[DailyLog]) -> SummaryStats {
    summarize_entries(logs.iter().flat_map(|log| log.exercises.iter()))
}

fn summarize_entries<'a>(entries: impl IntoIterator<Item = &'a ExerciseEntry>) -> SummaryStats {
    let mut stats = SummaryStats::default();
    for entry in entries {
        stats.total_exercises += 1;
        stats.total_minutes += entry.duration_minutes;
        *stats
            .breakdown_by_exercise
            .entry(entry.breakdown_key())
            .or_insert(0.0) += entry.duration_minutes;
    }
    stats
}

/// Totals for a single day. A missing log yields zeroed stats.
pub fn daily_summary(log: Option<&DailyLog>) -> SummaryStats {
    match log {
        Some(log) => summarize_entries(&log.exercises),
        None => SummaryStats::default(),
    }
}

/// Totals for the Monday-to-Sunday week containing `date`.
/// The average always divides by seven, whatever the number of active days.
pub fn weekly_summary(logs: &[DailyLog], date: NaiveDate) -> SummaryStats {
    let range = DateRange::week_of(date);
    let in_week = logs_in_range(logs, &range);
    debug!(start = %range.start, end = %range.end, logs = in_week.len(), "weekly summary");

    let mut stats = create_summary(&in_week);
    stats.average_minutes_per_day = Some(round1(stats.total_minutes / 7.0));
    stats
}

/// Totals for the calendar month containing `date`.
///
/// `average_minutes_per_day` holds the mean of the per-week totals of the
/// ISO weeks that have logs in the month (zero when there are none).
pub fn monthly_summary(logs: &[DailyLog], date: NaiveDate) -> SummaryStats {
    let range = DateRange::month_of(date);
    let in_month = logs_in_range(logs, &range);
    debug!(start = %range.start, end = %range.end, logs = in_month.len(), "monthly summary");

    let mut stats = create_summary(&in_month);
    let week_totals = weekly_totals(&in_month);
    let average = if week_totals.is_empty() {
        0.0
    } else {
        week_totals.values().sum::<f64>() / week_totals.len() as f64
    };
    stats.average_minutes_per_day = Some(round1(average));
    stats
}

/// One point per calendar day of the week containing `date`, zero-filled.
pub fn daily_totals_for_week(logs: &[DailyLog], date: NaiveDate) -> Vec<TrendPoint> {
    daily_totals_for(logs, &DateRange::week_of(date))
}

/// One point per calendar day of the month containing `date`, zero-filled.
pub fn daily_totals_for_month(logs: &[DailyLog], date: NaiveDate) -> Vec<TrendPoint> {
    daily_totals_for(logs, &DateRange::month_of(date))
}

fn daily_totals_for(logs: &[DailyLog], range: &DateRange) -> Vec<TrendPoint> {
    let by_date: HashMap<&str, f64> = logs
        .iter()
        .map(|log| (log.date.as_str(), log.total_minutes()))
        .collect();

    range
        .days()
        .into_iter()
        .map(|day| {
            let total_minutes = by_date.get(day.as_str()).copied().unwrap_or(0.0);
            TrendPoint {
                date: day,
                total_minutes,
            }
        })
        .collect()
}

/// One point per stored log (gaps are skipped), ascending by date.
pub fn trend_series(logs: &[DailyLog]) -> Vec<TrendPoint> {
    logs.iter()
        .sorted_by(|a, b| a.date.cmp(&b.date))
        .map(|log| TrendPoint {
            date: log.date.clone(),
            total_minutes: log.total_minutes(),
        })
        .collect()
}

pub fn insights(logs: &[DailyLog]) -> TrendInsights {
    let active: Vec<TrendPoint> = trend_series(logs)
        .into_iter()
        .filter(|point| point.total_minutes > 0.0)
        .collect();

    let longest_streak_days = longest_streak(active.iter().map(|p| p.date.as_str()));

    let mut most_active_day = None;
    let mut max_minutes = f64::NEG_INFINITY;
    for point in &active {
        if point.total_minutes > max_minutes {
            max_minutes = point.total_minutes;
            most_active_day = Some(point.date.clone());
        }
    }

    TrendInsights {
        longest_streak_days,
        most_active_day,
        weekly_growth_percentage: weekly_growth(logs),
    }
}

/// Length of the longest run of consecutive calendar days among `dates`.
/// Duplicates are ignored; any single date is a streak of one.
pub fn longest_streak<'a>(dates: impl IntoIterator<Item = &'a str>) -> u32 {
    let unique: Vec<&str> = dates.into_iter().sorted().dedup().collect();
    if unique.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut current = 1;
    for (prev, next) in unique.iter().tuple_windows() {
        let consecutive = match (parse_date(prev), parse_date(next)) {
            (Some(p), Some(n)) => p.succ_opt() == Some(n),
            _ => false,
        };
        if consecutive {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}

/// Percentage change between the week holding the latest log and the week
/// before it. A quiet previous week gives 100 when the current week has
/// minutes and 0 otherwise.
pub fn weekly_growth(logs: &[DailyLog]) -> f64 {
    let Some(latest) = logs.iter().map(|log| log.date.as_str()).max() else {
        return 0.0;
    };
    let Some(latest) = parse_date(latest) else {
        return 0.0;
    };

    let current_week = DateRange::week_of(latest);
    let previous_week = current_week.previous_week();
    let current = minutes_within(logs, &current_week);
    let previous = minutes_within(logs, &previous_week);
    debug!(current, previous, "weekly growth");

    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    round1((current - previous) / previous * 100.0)
}

fn minutes_within(logs: &[DailyLog], range: &DateRange) -> f64 {
    logs.iter()
        .filter(|log| range.contains_text(&log.date))
        .map(DailyLog::total_minutes)
        .sum()
}

fn logs_in_range(logs: &[DailyLog], range: &DateRange) -> Vec<DailyLog> {
    logs.iter()
        .filter(|log| range.contains_text(&log.date))
        .cloned()
        .collect()
}

/// Minutes per ISO week label.
fn weekly_totals(logs: &[DailyLog]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for log in logs {
        let Some(date) = parse_date(&log.date) else {
            continue;
        };
        *totals.entry(week_label(date)).or_insert(0.0) += log.total_minutes();
    }
    totals
}
