//! Sleep command showing the gaps between waking periods.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use daylog_core::SleepInterval;
use daylog_core::summary::{SleepStats, sleep_stats};
use serde::Serialize;

use crate::commands::util::{format_duration, format_hours, write_json};

/// JSON sleep report.
#[derive(Debug, Serialize)]
pub struct JsonSleepReport<'a> {
    pub intervals: &'a [SleepInterval],
    pub stats: Option<SleepStats>,
}

/// Formats intervals, summary statistics and a histogram.
pub fn format_sleep(intervals: &[SleepInterval], stats: Option<&SleepStats>) -> String {
    let mut output = String::new();

    let Some(stats) = stats else {
        writeln!(output, "No sleep data.").unwrap();
        return output;
    };

    writeln!(output, "SLEEP").unwrap();
    writeln!(output, "─────").unwrap();
    for interval in intervals {
        writeln!(
            output,
            "{:<9}-> {:<9}{:>8}",
            interval.current_date,
            interval.next_date,
            format_duration(u32::from(interval.sleep_minutes))
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "Nights: {}  Mean: {}  Min: {}  Max: {}",
        stats.count,
        format_hours(stats.mean_hours),
        format_hours(stats.min_hours),
        format_hours(stats.max_hours)
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(output, "HISTOGRAM").unwrap();
    writeln!(output, "─────────").unwrap();
    for bin in &stats.histogram {
        writeln!(
            output,
            "{:>5.2}h - {:>5.2}h  {} {}",
            bin.lower_hours,
            bin.upper_hours,
            "█".repeat(bin.count),
            bin.count
        )
        .unwrap();
    }

    output
}

pub fn run<W: Write>(
    writer: &mut W,
    intervals: &[SleepInterval],
    bins: usize,
    json: bool,
) -> Result<()> {
    let stats = sleep_stats(intervals, bins);

    if json {
        write_json(writer, &JsonSleepReport { intervals, stats })?;
    } else {
        write!(writer, "{}", format_sleep(intervals, stats.as_ref()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use daylog_core::{CategoryTable, Timeline};
    use insta::assert_snapshot;

    fn intervals() -> Vec<SleepInterval> {
        Timeline::from_text(
            "3/14/24 Th 0700-2300\n3/15/24 F 0600-0100\n3/16/24 Sa 0830-2330\n",
            &CategoryTable::standard(),
        )
        .sleep
    }

    #[test]
    fn sleep_output() {
        let intervals = intervals();
        let stats = sleep_stats(&intervals, 2);
        let output = format_sleep(&intervals, stats.as_ref());
        assert_snapshot!(output);
    }

    #[test]
    fn no_sleep_data() {
        assert_eq!(format_sleep(&[], None), "No sleep data.\n");
    }

    #[test]
    fn json_output_includes_stats() {
        let mut output = Vec::new();
        run(&mut output, &intervals(), 20, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["intervals"].as_array().unwrap().len(), 2);
        assert_eq!(value["intervals"][0]["sleep_duration_hours"], 7.0);
        assert_eq!(value["stats"]["count"], 2);
    }
}
