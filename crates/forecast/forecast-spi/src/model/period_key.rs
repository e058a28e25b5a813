//! Calendar month key

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month, rendered as `YYYY-MM`.
///
/// Parses from `YYYY-MM` or from a full date `YYYY-MM-DD`; the day is
/// dropped. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Create a key, validating `month` in 1..=12 and a four-digit year.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=9999).contains(&year) {
            return Err(ForecastError::InvalidSeries(format!(
                "year {} out of range 1..=9999",
                year
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidSeries(format!(
                "month {} out of range 1..=12",
                month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months elapsed since January of year 0.
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: (ordinal.rem_euclid(12) + 1) as u32,
        }
    }

    /// The following calendar month.
    pub fn next(&self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Signed number of months from `self` to `later`.
    pub fn months_until(&self, later: &PeriodKey) -> i64 {
        later.ordinal() - self.ordinal()
    }
}

fn parse_component(raw: &str, what: &str, input: &str) -> Result<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ForecastError::InvalidSeries(format!(
            "malformed {} in period key '{}'",
            what, input
        )));
    }
    raw.parse::<u32>().map_err(|_| {
        ForecastError::InvalidSeries(format!("malformed {} in period key '{}'", what, input))
    })
}

impl FromStr for PeriodKey {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let parts: Vec<&str> = input.split('-').collect();
        if !(2..=3).contains(&parts.len()) || parts[0].len() != 4 || parts[1].len() > 2 {
            return Err(ForecastError::InvalidSeries(format!(
                "period key '{}' is not YYYY-MM",
                input
            )));
        }

        let year = parse_component(parts[0], "year", input)?;
        let month = parse_component(parts[1], "month", input)?;
        if let Some(day) = parts.get(2) {
            let day = parse_component(day, "day", input)?;
            if !(1..=31).contains(&day) {
                return Err(ForecastError::InvalidSeries(format!(
                    "day {} out of range in '{}'",
                    day, input
                )));
            }
        }

        Self::new(year as i32, month)
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
