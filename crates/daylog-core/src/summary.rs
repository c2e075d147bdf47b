//! Aggregations over the flat activity table.
//!
//! Everything here consumes [`Activity`] rows that already passed the
//! lights-out and empty-duration filter. Views that describe waking time also
//! drop the sleep category; [`weekday_averages`] and [`category_summary`]
//! see every row.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::{CategoryTable, SLEEP_CODE};
use crate::derive::{Activity, SleepInterval};

/// Weekday tokens in display order.
pub const WEEKDAY_ORDER: [&str; 7] = ["M", "T", "W", "Th", "F", "Sa", "Su"];

/// Days per week bucket.
pub const DAYS_PER_WEEK: usize = 7;

fn is_waking(activity: &Activity) -> bool {
    activity.category != SLEEP_CODE
}

/// Adds up hours. An empty input gives `0.0`, never `-0.0`.
pub fn sum_hours<I: IntoIterator<Item = f64>>(hours: I) -> f64 {
    hours.into_iter().fold(0.0, |acc, value| acc + value)
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum_hours(values.iter().copied()) / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Key that orders codes by table position, unknown codes last by name.
fn category_order(table: &CategoryTable, code: &str) -> (usize, String) {
    (table.position(code).unwrap_or(usize::MAX), code.to_string())
}

// ========== Category Summary ==========

/// Per-category statistics over all rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub code: String,
    pub category_name: String,
    pub total_hours: f64,
    pub total_count: usize,
    pub avg_duration_hours: f64,
    pub median_duration_hours: f64,
}

/// Statistics for every code in the table, in table order.
///
/// Codes without rows are reported with zeros.
pub fn category_summary(rows: &[Activity], table: &CategoryTable) -> Vec<CategorySummary> {
    table
        .iter()
        .map(|category| {
            let hours: Vec<f64> = rows
                .iter()
                .filter(|row| row.category == category.code)
                .map(|row| row.duration_hours)
                .collect();
            CategorySummary {
                code: category.code.clone(),
                category_name: category.name.clone(),
                total_hours: sum_hours(hours.iter().copied()),
                total_count: hours.len(),
                avg_duration_hours: mean(&hours),
                median_duration_hours: median(&hours),
            }
        })
        .collect()
}

// ========== Category Totals ==========

/// Waking hours for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub code: String,
    pub category_name: String,
    pub hours: f64,
}

/// Waking hours per category present in the rows.
pub fn category_totals(rows: &[Activity], table: &CategoryTable) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<(usize, String), f64> = BTreeMap::new();
    for row in rows.iter().filter(|row| is_waking(row)) {
        *totals.entry(category_order(table, &row.category)).or_default() += row.duration_hours;
    }
    totals
        .into_iter()
        .map(|((_, code), hours)| CategoryTotal {
            category_name: table.name_for(&code).to_string(),
            code,
            hours,
        })
        .collect()
}

// ========== Week Buckets ==========

/// Waking hours for one category on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCategoryHours {
    pub date: NaiveDate,
    pub code: String,
    pub category_name: String,
    pub hours: f64,
}

/// Seven consecutive logged dates and their per-category hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekBucket {
    /// 1-based bucket number.
    pub number: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub dates: Vec<NaiveDate>,
    pub entries: Vec<DailyCategoryHours>,
}

/// Groups distinct logged dates into buckets of seven.
///
/// Buckets follow logged dates, not calendar weeks: gaps in the log do not
/// create empty buckets. Undated rows are ignored.
pub fn week_buckets(rows: &[Activity], table: &CategoryTable) -> Vec<WeekBucket> {
    let waking: Vec<(NaiveDate, &Activity)> = rows
        .iter()
        .filter(|row| is_waking(row))
        .filter_map(|row| row.parsed_date.map(|date| (date, row)))
        .collect();
    let dates: Vec<NaiveDate> = waking
        .iter()
        .map(|(date, _)| *date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    dates
        .chunks(DAYS_PER_WEEK)
        .enumerate()
        .filter_map(|(idx, chunk)| {
            let (&start_date, &end_date) = (chunk.first()?, chunk.last()?);
            let mut hours: BTreeMap<(NaiveDate, usize, String), f64> = BTreeMap::new();
            for (date, row) in &waking {
                if *date < start_date || *date > end_date {
                    continue;
                }
                let (position, code) = category_order(table, &row.category);
                *hours.entry((*date, position, code)).or_default() += row.duration_hours;
            }
            let entries = hours
                .into_iter()
                .map(|((date, _, code), hours)| DailyCategoryHours {
                    date,
                    category_name: table.name_for(&code).to_string(),
                    code,
                    hours,
                })
                .collect();
            Some(WeekBucket {
                number: idx + 1,
                start_date,
                end_date,
                dates: chunk.to_vec(),
                entries,
            })
        })
        .collect()
}

// ========== Category Details ==========

/// Waking hours spent on one description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionTotal {
    pub description: String,
    pub total_hours: f64,
    pub count: usize,
}

/// One page of a category's descriptions, largest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDetails {
    pub code: String,
    pub category_name: String,
    /// 1-based page shown.
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub entries: Vec<DescriptionTotal>,
    /// Hours across all descriptions, not only this page.
    pub total_hours: f64,
    pub distinct_activities: usize,
    pub avg_hours_per_activity: f64,
}

/// Groups a category's waking rows by description and returns one page.
///
/// Pages are 1-based; a page past the end shows the last page. A zero page
/// size is treated as one.
pub fn category_details(
    rows: &[Activity],
    table: &CategoryTable,
    code: &str,
    page: usize,
    page_size: usize,
) -> CategoryDetails {
    let mut grouped: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in rows
        .iter()
        .filter(|row| is_waking(row) && row.category == code)
    {
        let entry = grouped.entry(row.description.as_str()).or_default();
        entry.0 += row.duration_hours;
        entry.1 += 1;
    }

    // BTreeMap order makes the description tie-break ascending.
    let mut all: Vec<DescriptionTotal> = grouped
        .into_iter()
        .map(|(description, (total_hours, count))| DescriptionTotal {
            description: description.to_string(),
            total_hours,
            count,
        })
        .collect();
    all.sort_by(|a, b| b.total_hours.total_cmp(&a.total_hours));

    let totals: Vec<f64> = all.iter().map(|entry| entry.total_hours).collect();
    let page_size = page_size.max(1);
    let total_pages = all.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let entries = all
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    CategoryDetails {
        code: code.to_string(),
        category_name: table.name_for(code).to_string(),
        page,
        total_pages,
        page_size,
        entries,
        total_hours: sum_hours(totals.iter().copied()),
        distinct_activities: all.len(),
        avg_hours_per_activity: mean(&totals),
    }
}

// ========== Keyword Totals ==========

/// A labelled case-insensitive description substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordPattern {
    pub label: String,
    pub pattern: String,
}

impl KeywordPattern {
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }

    pub fn matches(&self, description: &str) -> bool {
        description
            .to_lowercase()
            .contains(&self.pattern.to_lowercase())
    }
}

/// The course patterns tracked out of the box.
pub fn default_keyword_patterns() -> Vec<KeywordPattern> {
    vec![
        KeywordPattern::new("ITSC (General)", "ITSC"),
        KeywordPattern::new("ITSC Homework", "hw ITSC"),
        KeywordPattern::new("STAT (General)", "STAT"),
        KeywordPattern::new("STAT Homework", "hw STAT"),
    ]
}

/// Waking hours matching one keyword pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordTotal {
    pub label: String,
    pub pattern: String,
    pub hours: f64,
}

/// Sums waking hours per pattern, keeping pattern order.
///
/// Patterns overlap freely; a row counts toward every pattern it matches.
/// Patterns with no hours are left out.
pub fn keyword_totals(rows: &[Activity], patterns: &[KeywordPattern]) -> Vec<KeywordTotal> {
    patterns
        .iter()
        .map(|pattern| KeywordTotal {
            label: pattern.label.clone(),
            pattern: pattern.pattern.clone(),
            hours: sum_hours(
                rows.iter()
                    .filter(|row| is_waking(row) && pattern.matches(&row.description))
                    .map(|row| row.duration_hours),
            ),
        })
        .filter(|total| total.hours > 0.0)
        .collect()
}

// ========== Weekday Averages ==========

/// Mean minutes per weekday for a filtered set of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayAverage {
    pub day_of_week: String,
    pub average_minutes: f64,
    pub count: usize,
}

/// Averages duration by weekday for rows of `category` whose description
/// contains `keyword` (case-insensitive).
///
/// Weekdays follow [`WEEKDAY_ORDER`]; unrecognised tokens come after, sorted.
pub fn weekday_averages(rows: &[Activity], category: &str, keyword: &str) -> Vec<WeekdayAverage> {
    let keyword = keyword.to_lowercase();
    let mut grouped: BTreeMap<(usize, String), Vec<f64>> = BTreeMap::new();
    for row in rows {
        if row.category != category || !row.description.to_lowercase().contains(&keyword) {
            continue;
        }
        let Some(minutes) = row.duration_minutes else {
            continue;
        };
        let position = WEEKDAY_ORDER
            .iter()
            .position(|day| *day == row.day_of_week)
            .unwrap_or(usize::MAX);
        grouped
            .entry((position, row.day_of_week.clone()))
            .or_default()
            .push(f64::from(minutes));
    }

    grouped
        .into_iter()
        .map(|((_, day_of_week), minutes)| WeekdayAverage {
            day_of_week,
            average_minutes: mean(&minutes),
            count: minutes.len(),
        })
        .collect()
}

// ========== Sleep Statistics ==========

/// One equal-width histogram bin, `[lower, upper)` except the last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower_hours: f64,
    pub upper_hours: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepStats {
    pub count: usize,
    pub mean_hours: f64,
    pub min_hours: f64,
    pub max_hours: f64,
    pub histogram: Vec<HistogramBin>,
}

/// Summarises sleep intervals; `None` when there are none.
///
/// The histogram spans `[min, max]` in `bins` equal bins. When every interval
/// has the same length a single bin holds them all.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn sleep_stats(intervals: &[SleepInterval], bins: usize) -> Option<SleepStats> {
    let hours: Vec<f64> = intervals
        .iter()
        .map(|interval| interval.sleep_duration_hours)
        .collect();
    let min_hours = hours.iter().copied().reduce(f64::min)?;
    let max_hours = hours.iter().copied().reduce(f64::max)?;

    let span = max_hours - min_hours;
    let bins = if span > 0.0 { bins.max(1) } else { 1 };
    let width = span / bins as f64;

    let mut counts = vec![0usize; bins];
    for value in &hours {
        let idx = if width > 0.0 {
            (((value - min_hours) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }

    let histogram = counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            lower_hours: min_hours + width * idx as f64,
            upper_hours: if idx + 1 == bins {
                max_hours
            } else {
                min_hours + width * (idx + 1) as f64
            },
            count,
        })
        .collect();

    Some(SleepStats {
        count: hours.len(),
        mean_hours: mean(&hours),
        min_hours,
        max_hours,
        histogram,
    })
}
