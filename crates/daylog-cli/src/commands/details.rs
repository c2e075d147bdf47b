//! Details command breaking one category down by description.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use daylog_core::summary::{CategoryDetails, category_details};
use daylog_core::{CategoryTable, Timeline};

use crate::commands::util::{format_hours, write_json};

pub fn format_details(details: &CategoryDetails) -> String {
    let mut output = String::new();

    if details.entries.is_empty() {
        writeln!(output, "No activities found for {}.", details.category_name).unwrap();
        return output;
    }

    writeln!(
        output,
        "{} ({}) activities, page {}/{}",
        details.category_name, details.code, details.page, details.total_pages
    )
    .unwrap();
    for entry in &details.entries {
        writeln!(
            output,
            "  {:<32}{:>8}  x{}",
            entry.description,
            format_hours(entry.total_hours),
            entry.count
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "Total: {}  Activities: {}  Avg per activity: {}",
        format_hours(details.total_hours),
        details.distinct_activities,
        format_hours(details.avg_hours_per_activity)
    )
    .unwrap();

    output
}

pub fn run<W: Write>(
    writer: &mut W,
    timeline: &Timeline,
    table: &CategoryTable,
    code: &str,
    page: usize,
    page_size: usize,
    json: bool,
) -> Result<()> {
    if table.get(code).is_none() {
        tracing::warn!(code, "category code is not in the category table");
    }
    let details = category_details(&timeline.activities, table, code, page, page_size);

    if json {
        write_json(writer, &details)?;
    } else {
        write!(writer, "{}", format_details(&details))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    const LOG: &str = "\
3/14/24 Th 0700-2330
2330 LO lo
2200 P hw ITSC 101 notes
2000 S comm texting mom
1600 P study
1500 P hw ITSC 101 notes
";

    #[test]
    fn details_output() {
        let table = CategoryTable::standard();
        let timeline = Timeline::from_text(LOG, &table);
        let details = category_details(&timeline.activities, &table, "P", 1, 10);
        let output = format_details(&details);
        assert_snapshot!(output);
    }

    #[test]
    fn details_respects_page_size() {
        let table = CategoryTable::standard();
        let timeline = Timeline::from_text(LOG, &table);

        let mut output = Vec::new();
        run(&mut output, &timeline, &table, "P", 2, 1, false).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Productive (P) activities, page 2/2\n"));
        assert!(output.contains("hw ITSC 101 notes"));
        assert!(!output.contains("study"));
    }

    #[test]
    fn details_for_empty_category() {
        let table = CategoryTable::standard();
        let timeline = Timeline::from_text(LOG, &table);
        let details = category_details(&timeline.activities, &table, "W", 1, 10);
        assert_eq!(format_details(&details), "No activities found for Workout.\n");
    }
}
