// Copyright (c) Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Grouping frequency for period buckets. Parsed from the conventional
/// codes `D`, `W`, `MS`, `QS`, `YS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    MonthStart,
    QuarterStart,
    YearStart,
}

impl Frequency {
    /// The left-closed label of the period containing `date`: the date
    /// itself for days, the Monday on or before it for weeks, the first of
    /// the month/quarter/year otherwise.
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => date,
            Frequency::Weekly => {
                date - Days::new(u64::from(date.weekday().num_days_from_monday()))
            }
            Frequency::MonthStart => first_of_month(date.year(), date.month()),
            Frequency::QuarterStart => {
                let quarter_month = (date.month0() / 3) * 3 + 1;
                first_of_month(date.year(), quarter_month)
            }
            Frequency::YearStart => first_of_month(date.year(), 1),
        }
    }

    /// The next boundary of a period sequence anchored at `date`.
    /// Month-based frequencies step calendar-aware, so month lengths and
    /// leap years are respected.
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => date + Days::new(1),
            Frequency::Weekly => date + Days::new(7),
            Frequency::MonthStart => date + Months::new(1),
            Frequency::QuarterStart => date + Months::new(3),
            Frequency::YearStart => date + Months::new(12),
        }
    }

    /// Length of the period that starts at `date`, as the difference of the
    /// first two boundaries of a sequence anchored there.
    pub fn period_duration(self, date: NaiveDate) -> Duration {
        self.advance(date) - date
    }

    pub fn code(self) -> &'static str {
        match self {
            Frequency::Daily => "D",
            Frequency::Weekly => "W",
            Frequency::MonthStart => "MS",
            Frequency::QuarterStart => "QS",
            Frequency::YearStart => "YS",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown frequency '{0}', expected one of D, W, MS, QS, YS")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "D" => Ok(Frequency::Daily),
            "W" => Ok(Frequency::Weekly),
            "MS" => Ok(Frequency::MonthStart),
            "QS" => Ok(Frequency::QuarterStart),
            // AS is the legacy alias for year-start
            "YS" | "AS" => Ok(Frequency::YearStart),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // month is always 1..=12 here
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// An inclusive date range with the fixed-ratio span counts used for
/// average-balance normalization: weeks are 7 days, months 365/12 days,
/// years 365 days by contract, not calendar-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn num_weeks(&self) -> f64 {
        self.num_days() as f64 / 7.0
    }

    pub fn num_months(&self) -> f64 {
        self.num_days() as f64 / (365.0 / 12.0)
    }

    pub fn num_years(&self) -> f64 {
        self.num_days() as f64 / 365.0
    }
}
