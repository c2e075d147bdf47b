//! Status command for showing what was parsed from the log.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use daylog_core::Timeline;

use crate::commands::util::format_hours;

pub fn run<W: Write>(writer: &mut W, log_path: &Path, timeline: &Timeline) -> Result<()> {
    writeln!(writer, "Activity log status")?;
    writeln!(writer, "Log: {}", log_path.display())?;

    if timeline.days.is_empty() {
        writeln!(writer, "No days recorded.")?;
        return Ok(());
    }

    let tracked: f64 = timeline
        .waking_activities()
        .map(|activity| activity.duration_hours)
        .sum();

    writeln!(
        writer,
        "Days: {} ({} undated)",
        timeline.days.len(),
        timeline.undated_days()
    )?;
    writeln!(writer, "Activities: {}", timeline.activities.len())?;
    writeln!(writer, "Sleep intervals: {}", timeline.sleep.len())?;
    writeln!(writer, "Tracked: {}", format_hours(tracked))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use daylog_core::CategoryTable;
    use insta::assert_snapshot;

    #[test]
    fn status_command_outputs_counts() {
        let timeline = Timeline::from_text(
            "\
3/14/24 Th 0700-2330
2330 LO lo
2200 P hw ITSC 101 notes
2000 S comm texting mom
13/40/24 X 0800-2300
1200 E lunch
1100 R shower
",
            &CategoryTable::standard(),
        );

        let mut output = Vec::new();
        run(&mut output, Path::new("/logs/diaw.txt"), &timeline).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output);
    }

    #[test]
    fn status_command_empty_log() {
        let timeline = Timeline::from_text("", &CategoryTable::standard());
        let mut output = Vec::new();
        run(&mut output, Path::new("diaw.txt"), &timeline).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.ends_with("No days recorded.\n"));
    }
}
