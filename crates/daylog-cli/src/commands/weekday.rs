//! Weekday command: average minutes per weekday for matching activities.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use daylog_core::Timeline;
use daylog_core::summary::{WeekdayAverage, weekday_averages};

use crate::commands::util::write_json;

pub fn format_weekdays(averages: &[WeekdayAverage]) -> String {
    let mut output = String::new();

    if averages.is_empty() {
        writeln!(output, "No matching activities.").unwrap();
        return output;
    }

    writeln!(output, "{:<5}{:>10}{:>7}", "DAY", "AVG MIN", "COUNT").unwrap();
    for average in averages {
        writeln!(
            output,
            "{:<5}{:>10.1}{:>7}",
            average.day_of_week, average.average_minutes, average.count
        )
        .unwrap();
    }

    output
}

pub fn run<W: Write>(
    writer: &mut W,
    timeline: &Timeline,
    category: &str,
    keyword: &str,
    json: bool,
) -> Result<()> {
    let averages = weekday_averages(&timeline.activities, category, keyword);

    if json {
        write_json(writer, &averages)?;
    } else {
        write!(writer, "{}", format_weekdays(&averages))?;
    }
    Ok(())
}
