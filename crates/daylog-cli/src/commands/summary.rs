//! Summary command for time per category.
//!
//! Shows waking hours per category as bars, then the per-category
//! statistics table (count, total, mean and median hours).

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use daylog_core::summary::{
    CategorySummary, CategoryTotal, category_summary, category_totals, sum_hours,
};
use daylog_core::{CategoryTable, Timeline};
use serde::Serialize;

use crate::commands::util::{format_hours, progress_bar, write_json};

/// JSON summary report.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub totals: Vec<CategoryTotal>,
    pub categories: Vec<CategorySummary>,
    pub total_hours: f64,
}

pub fn build(timeline: &Timeline, table: &CategoryTable) -> JsonSummary {
    let totals = category_totals(&timeline.activities, table);
    let total_hours = sum_hours(totals.iter().map(|total| total.hours));
    JsonSummary {
        totals,
        categories: category_summary(&timeline.activities, table),
        total_hours,
    }
}

/// Formats the human-readable summary.
pub fn format_summary(summary: &JsonSummary) -> String {
    let mut output = String::new();

    if summary.totals.is_empty() {
        writeln!(output, "No timed activities.").unwrap();
        return output;
    }

    let max = summary
        .totals
        .iter()
        .map(|total| total.hours)
        .fold(0.0, f64::max);

    writeln!(output, "BY CATEGORY").unwrap();
    writeln!(output, "───────────").unwrap();
    for total in &summary.totals {
        let label = format!("{} ({})", total.category_name, total.code);
        writeln!(
            output,
            "{label:<18}{:>8}  {}",
            format_hours(total.hours),
            progress_bar(total.hours, max)
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "STATISTICS").unwrap();
    writeln!(output, "──────────").unwrap();
    writeln!(
        output,
        "{:<12}{:>6}{:>9}{:>9}{:>9}",
        "CATEGORY", "COUNT", "TOTAL", "MEAN", "MEDIAN"
    )
    .unwrap();
    for category in &summary.categories {
        writeln!(
            output,
            "{:<12}{:>6}{:>8.2}h{:>8.2}h{:>8.2}h",
            category.category_name,
            category.total_count,
            category.total_hours,
            category.avg_duration_hours,
            category.median_duration_hours
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "Total tracked:  {}", format_hours(summary.total_hours)).unwrap();

    output
}

pub fn run<W: Write>(
    writer: &mut W,
    timeline: &Timeline,
    table: &CategoryTable,
    json: bool,
) -> Result<()> {
    let summary = build(timeline, table);

    if json {
        write_json(writer, &summary)?;
    } else {
        write!(writer, "{}", format_summary(&summary))?;
    }
    Ok(())
}
