use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

use extrack::{
    SummaryStats, TrendPoint,
    date::{format_date, readable_date, today},
    summary,
    types::{OutputFmt, emit},
    utils::{bar_lines, format_number},
};

use super::Storage;
use crate::cli::{Span, SummaryMode};

const BAR_WIDTH: usize = 40;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryJson<'a> {
    mode: &'a str,
    date: String,
    summary: &'a SummaryStats,
    daily_totals: &'a [TrendPoint],
}

pub fn show_summary(
    storage: &Storage,
    mode: SummaryMode,
    date: Option<NaiveDate>,
    fmt: OutputFmt,
) -> Result<()> {
    let date = date.unwrap_or_else(today);
    let day = format_date(date);
    let logs = storage.get_logs();

    let (label, stats, points, metrics) = match mode {
        SummaryMode::Daily => {
            let stats = summary::daily_summary(logs.iter().find(|l| l.date == day));
            let metrics = vec![
                ("Total Minutes", format_number(stats.total_minutes)),
                ("Exercises", stats.total_exercises.to_string()),
                ("Date", readable_date(&day)),
            ];
            ("daily", stats, summary::daily_totals_for_week(&logs, date), metrics)
        }
        SummaryMode::Weekly => {
            let stats = summary::weekly_summary(&logs, date);
            let metrics = vec![
                ("Total Minutes", format_number(stats.total_minutes)),
                (
                    "Avg Minutes / Day",
                    format_number(stats.average_minutes_per_day.unwrap_or(0.0)),
                ),
                ("Exercises", stats.total_exercises.to_string()),
            ];
            ("weekly", stats, summary::daily_totals_for_week(&logs, date), metrics)
        }
        SummaryMode::Monthly => {
            let stats = summary::monthly_summary(&logs, date);
            let metrics = vec![
                ("Total Minutes", format_number(stats.total_minutes)),
                (
                    "Weekly Average",
                    format_number(stats.average_minutes_per_day.unwrap_or(0.0)),
                ),
                ("Exercises", stats.total_exercises.to_string()),
            ];
            ("monthly", stats, summary::daily_totals_for_month(&logs, date), metrics)
        }
    };

    let json = SummaryJson {
        mode: label,
        date: day.clone(),
        summary: &stats,
        daily_totals: &points,
    };

    emit(fmt, &json, || {
        println!("{}", format!("{} summary", capitalize(label)).cyan().bold());
        for (name, value) in &metrics {
            println!("  {:<18} {}", format!("{name}:").dimmed(), value.bold());
        }

        println!("\n{}", "Exercise Breakdown:".cyan().bold());
        let rows = stats.sorted_breakdown();
        if rows.is_empty() {
            println!("{}", "  No exercises logged for this view.".dimmed());
        }
        for (name, minutes) in rows {
            println!("  {} • {} min", name, format_number(minutes));
        }

        println!("\n{}", "Activity:".cyan().bold());
        let label_of: fn(&str) -> String = match mode {
            SummaryMode::Monthly => |d| d[8..].to_string(),
            _ => |d| d[5..].to_string(),
        };
        for line in bar_lines(&points, BAR_WIDTH, label_of) {
            println!("{line}");
        }
    })
}

pub fn show_totals(storage: &Storage, span: Span, date: Option<NaiveDate>, fmt: OutputFmt) -> Result<()> {
    let date = date.unwrap_or_else(today);
    let logs = storage.get_logs();
    let points = match span {
        Span::Week => summary::daily_totals_for_week(&logs, date),
        Span::Month => summary::daily_totals_for_month(&logs, date),
    };

    emit(fmt, &points, || {
        let title = match span {
            Span::Week => "Minutes by day (week):",
            Span::Month => "Minutes by day (month):",
        };
        println!("{}", title.cyan().bold());
        for line in bar_lines(&points, BAR_WIDTH, |d| d.to_string()) {
            println!("{line}");
        }
    })
}

pub fn show_trend(storage: &Storage, fmt: OutputFmt) -> Result<()> {
    let series = summary::trend_series(&storage.get_logs());

    emit(fmt, &series, || {
        println!("{}", "Exercise minutes over time:".cyan().bold());
        if series.is_empty() {
            println!("{}", "  (no days logged)".dimmed());
        }
        for line in bar_lines(&series, BAR_WIDTH, |d| d.to_string()) {
            println!("{line}");
        }
    })
}

pub fn show_insights(storage: &Storage, fmt: OutputFmt) -> Result<()> {
    let insights = summary::insights(&storage.get_logs());

    emit(fmt, &insights, || {
        println!("{}", "Trends & Insights".cyan().bold());
        println!(
            "  {:<18} {} days",
            "Longest Streak:".dimmed(),
            insights.longest_streak_days.to_string().bold()
        );
        let most_active = insights
            .most_active_day
            .as_deref()
            .map(readable_date)
            .unwrap_or_else(|| "N/A".to_string());
        println!("  {:<18} {}", "Most Active Day:".dimmed(), most_active.bold());

        let growth = format!("{}%", format_number(insights.weekly_growth_percentage));
        let growth = if insights.weekly_growth_percentage < 0.0 {
            growth.red()
        } else {
            growth.green()
        };
        println!("  {:<18} {}", "Weekly Growth:".dimmed(), growth);
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
