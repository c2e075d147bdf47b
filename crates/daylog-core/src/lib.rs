//! Core logic for the daily activity log.
//!
//! This crate contains:
//! - Parsing: turning log text into day blocks of raw records
//! - Derivation: chronological order, durations, and sleep intervals
//! - Summaries: category, weekly, keyword and weekday aggregations
//! - Caching: memoized analysis keyed by content hash

pub mod cache;
pub mod category;
mod derive;
pub mod parse;
pub mod summary;
pub mod time;
mod timeline;

pub use cache::{ParseCache, content_key};
pub use category::{Category, CategoryError, CategoryTable, SLEEP_CODE, UNKNOWN_CATEGORY};
pub use derive::{
    Activity, DerivedDay, LIGHTS_OUT, SleepInterval, activity_table, adjacent_durations,
    chronological, derive_day, sleep_intervals,
};
pub use parse::{Day, DayHeader, RawActivityRecord, parse_log};
pub use summary::KeywordPattern;
pub use time::{ClockError, ClockTime, parse_diary_date};
pub use timeline::Timeline;
