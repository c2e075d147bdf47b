//! Duration and sleep derivation.
//!
//! # Algorithm
//!
//! 1. Reverse each day's records to get chronological order.
//! 2. Give every record the minutes until the next record, wrapping across
//!    midnight. The chronologically last record has no duration.
//! 3. Flatten all days into one activity table, dropping lights-out markers
//!    and rows without a positive duration.
//! 4. Sort dated days and take the gap between one day's end and the next
//!    day's start as sleep.

use chrono::NaiveDate;
use serde::Serialize;

use crate::category::CategoryTable;
use crate::parse::{Day, RawActivityRecord};
use crate::time::ClockTime;

/// Description that marks the end of a waking period.
pub const LIGHTS_OUT: &str = "lo";

/// A record enriched with its duration and its day's context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    /// Owning day's raw date.
    pub date: String,
    /// Owning day's calendar date, if it resolved.
    pub parsed_date: Option<NaiveDate>,
    pub day_of_week: String,
    /// Owning day's waking-period start.
    pub start_time: String,
    /// Owning day's waking-period end.
    pub end_time: String,
    /// The record's own `HHMM` time.
    pub time: String,
    pub category: String,
    pub category_name: String,
    pub description: String,
    /// Minutes until the next activity; `None` for the last one or when
    /// either time is invalid.
    pub duration_minutes: Option<u16>,
    /// `duration_minutes` in hours, 0 when unknown.
    pub duration_hours: f64,
}

impl Activity {
    /// Whether this is an end-of-day marker (description `lo`, any case).
    pub fn is_lights_out(&self) -> bool {
        self.description.eq_ignore_ascii_case(LIGHTS_OUT)
    }
}

/// A parsed day together with its chronologically ordered activities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedDay {
    #[serde(flatten)]
    pub day: Day,
    pub activities: Vec<Activity>,
}

/// Sleep between the end of one waking period and the start of the next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepInterval {
    pub current_date: String,
    pub next_date: String,
    pub sleep_minutes: u16,
    pub sleep_duration_hours: f64,
}

/// Puts latest-first records into chronological order.
pub fn chronological(records: &[RawActivityRecord]) -> Vec<&RawActivityRecord> {
    records.iter().rev().collect()
}

/// Minutes from each time to the next one.
///
/// The output has the same length as the input. The last entry is always
/// `None`, as is any entry where either side of the pair is `None`.
pub fn adjacent_durations(times: &[Option<ClockTime>]) -> Vec<Option<u16>> {
    let mut durations: Vec<Option<u16>> = times
        .windows(2)
        .map(|pair| match (pair[0], pair[1]) {
            (Some(from), Some(to)) => Some(from.minutes_until(to)),
            _ => None,
        })
        .collect();
    if !times.is_empty() {
        durations.push(None);
    }
    durations
}

pub(crate) fn minutes_to_hours(minutes: u16) -> f64 {
    f64::from(minutes) / 60.0
}

/// Derives a day's activities in chronological order.
pub fn derive_day(day: &Day, table: &CategoryTable) -> Vec<Activity> {
    let ordered = chronological(&day.records);
    let times: Vec<_> = ordered.iter().map(|record| record.clock()).collect();
    let durations = adjacent_durations(&times);

    ordered
        .into_iter()
        .zip(durations)
        .map(|(record, duration_minutes)| Activity {
            date: day.header.date.clone(),
            parsed_date: day.parsed_date,
            day_of_week: day.header.day_of_week.clone(),
            start_time: day.header.start_time.clone(),
            end_time: day.header.end_time.clone(),
            time: record.time.clone(),
            category: record.category.clone(),
            category_name: table.name_for(&record.category).to_string(),
            description: record.description.clone(),
            duration_minutes,
            duration_hours: duration_minutes.map_or(0.0, minutes_to_hours),
        })
        .collect()
}

/// Flattens days into the per-activity table consumed by aggregations.
///
/// Lights-out markers and rows with an unknown or zero duration are left out.
pub fn activity_table(days: &[DerivedDay]) -> Vec<Activity> {
    days.iter()
        .flat_map(|day| day.activities.iter())
        .filter(|activity| !activity.is_lights_out())
        .filter(|activity| activity.duration_minutes.is_some_and(|minutes| minutes > 0))
        .cloned()
        .collect()
}

/// Computes sleep between consecutive dated days.
///
/// Days without a calendar date are ignored. Days sharing a date keep their
/// file order. A pair whose end or start time is invalid yields no interval.
pub fn sleep_intervals<'a, I>(days: I) -> Vec<SleepInterval>
where
    I: IntoIterator<Item = &'a Day>,
{
    let mut dated: Vec<(NaiveDate, &Day)> = days
        .into_iter()
        .filter_map(|day| day.parsed_date.map(|date| (date, day)))
        .collect();
    dated.sort_by_key(|(date, _)| *date);

    dated
        .windows(2)
        .filter_map(|pair| {
            let (current, next) = (pair[0].1, pair[1].1);
            let (Some(end), Some(start)) = (current.header.end(), next.header.start()) else {
                tracing::trace!(
                    current = %current.header.date,
                    next = %next.header.date,
                    "skipping sleep interval with invalid boundary time"
                );
                return None;
            };
            let sleep_minutes = end.minutes_until(start);
            Some(SleepInterval {
                current_date: current.header.date.clone(),
                next_date: next.header.date.clone(),
                sleep_minutes,
                sleep_duration_hours: minutes_to_hours(sleep_minutes),
            })
        })
        .collect()
}
