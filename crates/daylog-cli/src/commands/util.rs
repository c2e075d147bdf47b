//! Shared utilities for CLI commands.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use daylog_core::{ParseCache, Timeline};
use serde::Serialize;

/// Reads the log at `path` and returns its (possibly cached) timeline.
pub fn load_timeline(path: &Path, cache: &ParseCache) -> Result<Arc<Timeline>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            anyhow::bail!("log file not found: {}", path.display());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read log file: {}", path.display()));
        }
    };
    tracing::debug!(path = %path.display(), bytes = text.len(), "read log file");
    Ok(cache.get_or_parse(&text))
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).context("failed to serialize output")?;
    writeln!(writer)?;
    Ok(())
}

/// Formats minutes as a duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats fractional hours as a duration string, rounded to the minute.
/// Negative or non-finite values are treated as 0m.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_hours(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return "0m".to_string();
    }
    format_duration((hours * 60.0).round() as u32)
}

/// Generates a 10-character progress bar.
/// Values <5% of max get a single block for visibility.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value / max;
    let filled = if ratio < 0.05 && value > 0.0 {
        1
    } else {
        (ratio * 10.0).round().clamp(0.0, 10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
