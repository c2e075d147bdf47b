//! Keywords command: hours per configured description pattern.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use daylog_core::summary::{KeywordTotal, keyword_totals};
use daylog_core::{KeywordPattern, Timeline};

use crate::commands::util::{format_hours, progress_bar, write_json};

pub fn format_keywords(totals: &[KeywordTotal]) -> String {
    let mut output = String::new();

    if totals.is_empty() {
        writeln!(output, "No keyword matches.").unwrap();
        return output;
    }

    let max = totals.iter().map(|total| total.hours).fold(0.0, f64::max);
    for total in totals {
        writeln!(
            output,
            "{:<18}{:>8}  {}",
            total.label,
            format_hours(total.hours),
            progress_bar(total.hours, max)
        )
        .unwrap();
    }

    output
}

pub fn run<W: Write>(
    writer: &mut W,
    timeline: &Timeline,
    patterns: &[KeywordPattern],
    json: bool,
) -> Result<()> {
    let totals = keyword_totals(&timeline.activities, patterns);

    if json {
        write_json(writer, &totals)?;
    } else {
        write!(writer, "{}", format_keywords(&totals))?;
    }
    Ok(())
}
