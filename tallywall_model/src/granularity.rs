// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How much time one tally mark stands for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One mark per calendar day.
    #[default]
    Day,
    /// One mark per anniversary of the start date.
    ///
    /// Anniversaries of February 29 fall on February 28 in common years.
    Year,
}

impl Granularity {
    /// Date of the `index`-th record of a wall starting at `start`.
    ///
    /// Returns `None` past the end of the representable calendar.
    #[must_use]
    pub fn date_at(self, start: NaiveDate, index: usize) -> Option<NaiveDate> {
        match self {
            Self::Day => start.checked_add_days(Days::new(u64::try_from(index).ok()?)),
            Self::Year => {
                let months = u32::try_from(index).ok()?.checked_mul(12)?;
                start.checked_add_months(Months::new(months))
            }
        }
    }

    /// Number of records from `start` through `today`, both inclusive.
    ///
    /// Zero when `today` precedes `start`.
    #[must_use]
    pub fn count_through(self, start: NaiveDate, today: NaiveDate) -> usize {
        if today < start {
            return 0;
        }
        match self {
            Self::Day => {
                let days = today.signed_duration_since(start).num_days();
                usize::try_from(days).map_or(0, |d| d + 1)
            }
            Self::Year => {
                let mut years = usize::try_from(today.year() - start.year()).unwrap_or(0);
                while years > 0 && self.date_at(start, years).is_none_or(|d| d > today) {
                    years -= 1;
                }
                years + 1
            }
        }
    }

    /// Lowercase name, as used in configuration and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" | "daily" => Ok(Self::Day),
            "year" | "years" | "yearly" => Ok(Self::Year),
            _ => Err(Error::UnknownGranularity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_count_is_inclusive() {
        let start = date(2000, 1, 1);
        assert_eq!(Granularity::Day.count_through(start, date(2000, 1, 3)), 3);
        assert_eq!(Granularity::Day.count_through(start, start), 1);
        assert_eq!(Granularity::Day.count_through(start, date(1999, 12, 31)), 0);
        assert_eq!(Granularity::Day.count_through(start, date(2001, 1, 1)), 367);
    }

    #[test]
    fn year_count_follows_anniversaries() {
        let start = date(1980, 1, 29);
        assert_eq!(Granularity::Year.count_through(start, date(1980, 12, 31)), 1);
        assert_eq!(Granularity::Year.count_through(start, date(1981, 1, 28)), 1);
        assert_eq!(Granularity::Year.count_through(start, date(1981, 1, 29)), 2);
        assert_eq!(Granularity::Year.count_through(start, date(2026, 10, 16)), 47);
    }

    #[test]
    fn leap_day_anniversaries_clamp() {
        let start = date(2000, 2, 29);
        assert_eq!(Granularity::Year.date_at(start, 1), Some(date(2001, 2, 28)));
        assert_eq!(Granularity::Year.date_at(start, 4), Some(date(2004, 2, 29)));
        assert_eq!(Granularity::Year.count_through(start, date(2001, 2, 28)), 2);
    }

    #[test]
    fn date_at_matches_count() {
        let start = date(2004, 8, 7);
        let today = date(2005, 4, 5);
        for g in [Granularity::Day, Granularity::Year] {
            let n = g.count_through(start, today);
            assert!(g.date_at(start, n - 1).unwrap() <= today);
            assert!(g.date_at(start, n).unwrap() > today);
        }
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("day".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!(" Yearly ".parse::<Granularity>().unwrap(), Granularity::Year);
        assert!("weekly".parse::<Granularity>().is_err());
        assert_eq!(Granularity::Year.to_string(), "year");
    }
}
