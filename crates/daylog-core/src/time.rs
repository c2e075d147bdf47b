//! Clock and calendar parsing for the tokens used in log headers and records.
//!
//! Both parsers are total: anything that does not look like a valid time or
//! date becomes `None` instead of an error, so a single garbled token never
//! aborts a parse.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Minutes in a full day, added when an interval crosses midnight.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Two-digit years below this pivot belong to the 2000s, the rest to the 1900s.
pub const CENTURY_PIVOT: i32 = 50;

/// Errors from parsing an `HHMM` token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The token is not exactly four ASCII digits.
    #[error("expected four digits in HHMM form, got {0:?}")]
    Malformed(String),

    /// Hour or minute is outside the valid range.
    #[error("time out of range: {0}")]
    OutOfRange(String),
}

/// A wall-clock time of day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: Self = Self(0);

    /// Builds a time from hour and minute, rejecting out-of-range values.
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    /// Parses an `HHMM` token, returning `None` for anything invalid.
    pub fn parse_hhmm(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Minutes from `self` forward to `later`.
    ///
    /// When `later` is numerically earlier the interval is taken to cross
    /// midnight, so the result is always in `0..MINUTES_PER_DAY`.
    pub const fn minutes_until(self, later: Self) -> u16 {
        if later.0 < self.0 {
            later.0 + MINUTES_PER_DAY - self.0
        } else {
            later.0 - self.0
        }
    }
}

impl FromStr for ClockTime {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(ClockError::Malformed(s.to_string()));
        }
        let digit = |i: usize| u16::from(bytes[i] - b'0');
        let hour = digit(0) * 10 + digit(1);
        let minute = digit(2) * 10 + digit(3);
        Self::from_hm(hour, minute).ok_or_else(|| ClockError::OutOfRange(s.to_string()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Parses an `M/D/YY` date.
///
/// The year is resolved against [`CENTURY_PIVOT`]. Non-numeric parts, the
/// wrong number of separators, or an impossible calendar date yield `None`.
pub fn parse_diary_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    let year = if year < CENTURY_PIVOT {
        year + 2000
    } else {
        year + 1900
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_hhmm() {
        let t = ClockTime::parse_hhmm("2330").unwrap();
        assert_eq!(t.minutes(), 23 * 60 + 30);
        assert_eq!(t.to_string(), "2330");

        assert_eq!(ClockTime::parse_hhmm("0000"), Some(ClockTime::MIDNIGHT));
        assert_eq!(ClockTime::parse_hhmm("0759").unwrap().minutes(), 479);
    }

    #[test]
    fn rejects_out_of_range_hhmm() {
        assert_eq!(ClockTime::parse_hhmm("2400"), None);
        assert_eq!(ClockTime::parse_hhmm("1260"), None);

        let err = "2561".parse::<ClockTime>().unwrap_err();
        assert_eq!(err, ClockError::OutOfRange("2561".to_string()));
    }

    #[test]
    fn rejects_malformed_hhmm() {
        for token in ["", "730", "07300", "7:30", "ab12", "-130", "１２３４"] {
            assert_eq!(ClockTime::parse_hhmm(token), None, "{token:?} should not parse");
        }
        let err = "730".parse::<ClockTime>().unwrap_err();
        assert_eq!(err.to_string(), "expected four digits in HHMM form, got \"730\"");
    }

    #[test]
    fn minutes_until_same_day() {
        let a = ClockTime::parse_hhmm("2000").unwrap();
        let b = ClockTime::parse_hhmm("2200").unwrap();
        assert_eq!(a.minutes_until(b), 120);
        assert_eq!(a.minutes_until(a), 0);
    }

    #[test]
    fn minutes_until_crosses_midnight() {
        let late = ClockTime::parse_hhmm("2330").unwrap();
        let early = ClockTime::parse_hhmm("0015").unwrap();
        assert_eq!(late.minutes_until(early), 45);

        let one_am = ClockTime::parse_hhmm("0100").unwrap();
        let half_past_midnight = ClockTime::parse_hhmm("0030").unwrap();
        assert_eq!(one_am.minutes_until(half_past_midnight), 1410);
    }

    #[test]
    fn two_digit_year_resolution() {
        assert_eq!(
            parse_diary_date("3/14/24"),
            NaiveDate::from_ymd_opt(2024, 3, 14)
        );
        assert_eq!(
            parse_diary_date("3/14/67"),
            NaiveDate::from_ymd_opt(1967, 3, 14)
        );
        assert_eq!(
            parse_diary_date("12/31/49"),
            NaiveDate::from_ymd_opt(2049, 12, 31)
        );
        assert_eq!(
            parse_diary_date("1/1/50"),
            NaiveDate::from_ymd_opt(1950, 1, 1)
        );
    }

    #[test]
    fn malformed_dates_are_none() {
        for raw in ["", "3/14", "3-14-24", "a/14/24", "3/14/24/1", "2/30/24", "13/1/24"] {
            assert_eq!(parse_diary_date(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn clock_time_serializes_as_hhmm() {
        let t = ClockTime::parse_hhmm("0705").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"0705\"");
    }
}
