//! Line-oriented parser for the daily log format.
//!
//! A log is a sequence of day blocks. Each block starts with a header line
//!
//! ```text
//! <M>/<D>/<YY> <weekday> <HHMM>-<HHMM>
//! ```
//!
//! followed by activity records written latest-first:
//!
//! ```text
//! <HHMM> <category> <description...>
//! ```
//!
//! Lines that match neither form are dropped on their own; they never affect
//! neighbouring lines or other days.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::time::{ClockTime, parse_diary_date};

/// Day header: date, weekday token, waking-period start and end.
static DAY_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}/[0-9]{1,2}/[0-9]{2})\s+(\w+)\s+([0-9]{4})-([0-9]{4})").unwrap()
});

/// The header line that opens a day block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    /// Raw `M/D/YY` date string.
    pub date: String,
    /// Free-text weekday abbreviation (e.g. "M", "Th").
    pub day_of_week: String,
    /// Waking-period start as written (`HHMM`).
    pub start_time: String,
    /// Waking-period end as written (`HHMM`).
    pub end_time: String,
}

impl DayHeader {
    /// Matches a trimmed line against the header pattern.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = DAY_HEADER_RE.captures(line)?;
        Some(Self {
            date: caps[1].to_string(),
            day_of_week: caps[2].to_string(),
            start_time: caps[3].to_string(),
            end_time: caps[4].to_string(),
        })
    }

    pub fn start(&self) -> Option<ClockTime> {
        ClockTime::parse_hhmm(&self.start_time)
    }

    pub fn end(&self) -> Option<ClockTime> {
        ClockTime::parse_hhmm(&self.end_time)
    }
}

/// An activity line exactly as written in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawActivityRecord {
    /// `HHMM` token; four digits but not necessarily a valid time.
    pub time: String,
    /// Category code.
    pub category: String,
    /// Free-text description, empty when omitted.
    pub description: String,
}

impl RawActivityRecord {
    /// Splits a trimmed line into `time category description`.
    ///
    /// The time token must be exactly four ASCII digits and a category token
    /// must follow it. Range checking of the time is left to [`Self::clock`].
    pub fn parse(line: &str) -> Option<Self> {
        let (time, rest) = next_field(line)?;
        if time.len() != 4 || !time.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let (category, description) = next_field(rest)?;
        Some(Self {
            time: time.to_string(),
            category: category.to_string(),
            description: description.trim_end().to_string(),
        })
    }

    /// The record's time, or `None` if it is out of range.
    pub fn clock(&self) -> Option<ClockTime> {
        ClockTime::parse_hhmm(&self.time)
    }
}

/// Splits off the first whitespace-delimited field.
fn next_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(
        s.split_once(char::is_whitespace)
            .map_or((s, ""), |(head, tail)| (head, tail.trim_start())),
    )
}

/// A day block: its header and its records in log (latest-first) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    #[serde(flatten)]
    pub header: DayHeader,
    /// Calendar date, `None` when the header date does not resolve.
    pub parsed_date: Option<NaiveDate>,
    /// Records as read, most recent first.
    pub records: Vec<RawActivityRecord>,
}

impl Day {
    fn open(header: DayHeader) -> Self {
        let parsed_date = parse_diary_date(&header.date);
        if parsed_date.is_none() {
            tracing::warn!(
                date = %header.date,
                "day header date does not resolve to a calendar date"
            );
        }
        Self {
            header,
            parsed_date,
            records: Vec::new(),
        }
    }
}

/// Parses the full text of a log into day blocks, in file order.
///
/// Blank lines are skipped. Anything before the first header is discarded,
/// and unrecognised lines inside a block are ignored. The last open block is
/// emitted at end of input.
pub fn parse_log(text: &str) -> Vec<Day> {
    let mut days = Vec::new();
    let mut current: Option<Day> = None;

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = DayHeader::parse(line) {
            if let Some(day) = current.take() {
                days.push(day);
            }
            current = Some(Day::open(header));
            continue;
        }

        let Some(day) = current.as_mut() else {
            tracing::trace!(line = idx + 1, "discarding line before first day header");
            continue;
        };

        match RawActivityRecord::parse(line) {
            Some(record) => day.records.push(record),
            None => tracing::trace!(line = idx + 1, "skipping unrecognised line"),
        }
    }

    if let Some(day) = current {
        days.push(day);
    }

    tracing::debug!(day_count = days.len(), "parsed day blocks");
    days
}
