//! One full parse-and-derive run over a log's text.

use serde::Serialize;

use crate::category::{CategoryTable, SLEEP_CODE};
use crate::derive::{
    Activity, DerivedDay, SleepInterval, activity_table, derive_day, sleep_intervals,
};
use crate::parse::parse_log;

/// Everything derived from one log text.
///
/// A pure function of the input text and category table: analysing the same
/// text twice gives equal timelines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    /// Days in file order, each with its chronological activities.
    pub days: Vec<DerivedDay>,
    /// Flat activity table, markers and empty durations removed.
    pub activities: Vec<Activity>,
    /// Sleep between consecutive dated days.
    pub sleep: Vec<SleepInterval>,
}

impl Timeline {
    pub fn from_text(text: &str, table: &CategoryTable) -> Self {
        let days = parse_log(text);
        let sleep = sleep_intervals(&days);
        let days: Vec<DerivedDay> = days
            .into_iter()
            .map(|day| {
                let activities = derive_day(&day, table);
                DerivedDay { day, activities }
            })
            .collect();
        let activities = activity_table(&days);

        tracing::debug!(
            days = days.len(),
            activities = activities.len(),
            sleep_intervals = sleep.len(),
            "derived timeline"
        );

        Self {
            days,
            activities,
            sleep,
        }
    }

    /// Number of days whose date did not resolve.
    pub fn undated_days(&self) -> usize {
        self.days
            .iter()
            .filter(|day| day.day.parsed_date.is_none())
            .count()
    }

    /// Activity rows outside the sleep category.
    pub fn waking_activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter().filter(|a| a.category != SLEEP_CODE)
    }
}
