//! Weeks command: per-day category hours in groups of seven logged days.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use daylog_core::summary::{WeekBucket, sum_hours, week_buckets};
use daylog_core::{CategoryTable, Timeline};

use crate::commands::util::{format_hours, write_json};

/// Formats one bucket as a header plus one line per date.
pub fn format_week(week: &WeekBucket) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "Week {}: {} to {}",
        week.number, week.start_date, week.end_date
    )
    .unwrap();

    for date in &week.dates {
        let entries: Vec<_> = week
            .entries
            .iter()
            .filter(|entry| entry.date == *date)
            .collect();
        let total = sum_hours(entries.iter().map(|entry| entry.hours));
        let breakdown = entries
            .iter()
            .map(|entry| format!("{} {:.1}h", entry.category_name, entry.hours))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            output,
            "  {}  {:>7}  {breakdown}",
            date.format("%m/%d (%a)"),
            format_hours(total)
        )
        .unwrap();
    }

    output
}

pub fn run<W: Write>(
    writer: &mut W,
    timeline: &Timeline,
    table: &CategoryTable,
    week: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut weeks = week_buckets(&timeline.activities, table);
    if let Some(number) = week {
        if !weeks.iter().any(|bucket| bucket.number == number) {
            anyhow::bail!("week {number} not found (log has {} weeks)", weeks.len());
        }
        weeks.retain(|bucket| bucket.number == number);
    }

    if json {
        return write_json(writer, &weeks);
    }

    if weeks.is_empty() {
        writeln!(writer, "No dated activities.")?;
        return Ok(());
    }
    for (idx, bucket) in weeks.iter().enumerate() {
        if idx > 0 {
            writeln!(writer)?;
        }
        write!(writer, "{}", format_week(bucket))?;
    }
    Ok(())
}
