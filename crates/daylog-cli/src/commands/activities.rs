//! Activities command listing the flat activity table.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use daylog_core::summary::sum_hours;
use daylog_core::{Activity, Timeline};

use crate::commands::util::{format_duration, format_hours, write_json};

/// Selects table rows, optionally restricted to one category code.
pub fn select<'a>(timeline: &'a Timeline, category: Option<&str>) -> Vec<&'a Activity> {
    timeline
        .activities
        .iter()
        .filter(|activity| category.is_none_or(|code| activity.category == code))
        .collect()
}

/// Formats rows as an aligned table with a total line.
pub fn format_activities(rows: &[&Activity]) -> String {
    let mut output = String::new();

    if rows.is_empty() {
        writeln!(output, "No timed activities.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<9}{:<4}{:<6}{:<5}{:>8}  {}",
        "DATE", "DAY", "TIME", "CAT", "DURATION", "DESCRIPTION"
    )
    .unwrap();
    for row in rows {
        let duration = row
            .duration_minutes
            .map_or_else(String::new, |minutes| format_duration(u32::from(minutes)));
        writeln!(
            output,
            "{:<9}{:<4}{:<6}{:<5}{:>8}  {}",
            row.date, row.day_of_week, row.time, row.category, duration, row.description
        )
        .unwrap();
    }

    let total = sum_hours(rows.iter().map(|row| row.duration_hours));
    writeln!(output).unwrap();
    writeln!(output, "{} activities, {} total", rows.len(), format_hours(total)).unwrap();

    output
}

pub fn run<W: Write>(
    writer: &mut W,
    timeline: &Timeline,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    let rows = select(timeline, category);
    tracing::debug!(rows = rows.len(), ?category, "selected activities");

    if json {
        write_json(writer, &rows)?;
    } else {
        write!(writer, "{}", format_activities(&rows))?;
    }
    Ok(())
}
