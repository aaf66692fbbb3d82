use colored::Colorize;

use crate::models::TrendPoint;

/// Number without a trailing `.0` for whole values, one decimal otherwise.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Horizontal bar chart lines, one per point, scaled to `width` columns.
pub fn bar_lines(points: &[TrendPoint], width: usize, label: impl Fn(&str) -> String) -> Vec<String> {
    let max = points
        .iter()
        .map(|p| p.total_minutes)
        .fold(0.0_f64, f64::max);

    points
        .iter()
        .map(|p| {
            let len = if max > 0.0 {
                ((p.total_minutes / max) * width as f64).round() as usize
            } else {
                0
            };
            let bar = "█".repeat(len);
            format!(
                "  {} {} {}",
                label(&p.date).dimmed(),
                bar.green(),
                format_number(p.total_minutes)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_minutes_have_no_fraction() {
        assert_eq!(format_number(50.0), "50");
        assert_eq!(format_number(7.14), "7.1");
    }

    #[test]
    fn bars_scale_to_the_largest_point() {
        colored::control::set_override(false);
        let points = vec![
            TrendPoint { date: "2026-02-09".into(), total_minutes: 30.0 },
            TrendPoint { date: "2026-02-10".into(), total_minutes: 15.0 },
            TrendPoint { date: "2026-02-11".into(), total_minutes: 0.0 },
        ];
        let lines = bar_lines(&points, 10, |d| d[5..].to_string());
        assert_eq!(lines[0], format!("  02-09 {} 30", "█".repeat(10)));
        assert_eq!(lines[1], format!("  02-10 {} 15", "█".repeat(5)));
        assert_eq!(lines[2], "  02-11  0");
    }
}
