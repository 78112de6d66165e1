// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::NaiveDate;

use crate::granularity::Granularity;
use crate::roster::{AliveSet, Roster};

/// One mark on the wall: a date and the people alive on it.
#[derive(Clone, Debug, PartialEq)]
pub struct TallyRecord {
    date: NaiveDate,
    alive: AliveSet,
}

impl TallyRecord {
    /// The date this record stands for.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// People alive on [`TallyRecord::date`], in birth order.
    #[must_use]
    pub fn alive(&self) -> &AliveSet {
        &self.alive
    }
}

/// The generated sequence of records, one per day or year since the
/// earliest birth on the roster.
///
/// Records are only ever appended: see [`TallyWall::advance_to`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TallyWall {
    roster: Roster,
    granularity: Granularity,
    records: Vec<TallyRecord>,
}

impl TallyWall {
    /// Generates records from the earliest birth through `today`, inclusive.
    ///
    /// An empty roster, or a `today` before the earliest birth, yields an
    /// empty wall.
    #[must_use]
    pub fn generate(roster: Roster, granularity: Granularity, today: NaiveDate) -> Self {
        let mut wall = Self {
            roster,
            granularity,
            records: Vec::new(),
        };
        if let Some(start) = wall.roster.earliest_birth() {
            wall.records.reserve(granularity.count_through(start, today));
        }
        wall.advance_to(today);
        tracing::debug!(
            records = wall.records.len(),
            people = wall.roster.len(),
            %granularity,
            %today,
            "generated tally wall"
        );
        wall
    }

    /// Appends the records for dates after the last one up to `today`.
    ///
    /// Returns how many records were appended. A `today` at or before the
    /// last record changes nothing.
    pub fn advance_to(&mut self, today: NaiveDate) -> usize {
        let Some(start) = self.roster.earliest_birth() else {
            return 0;
        };
        let before = self.records.len();
        while let Some(date) = self.granularity.date_at(start, self.records.len()) {
            if date > today {
                break;
            }
            let alive = self.roster.alive_on(date);
            self.records.push(TallyRecord { date, alive });
        }
        let appended = self.records.len() - before;
        if appended > 0 && before > 0 {
            tracing::info!(appended, total = self.records.len(), %today, "tally wall advanced");
        }
        appended
    }

    /// The people on this wall.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// What one record stands for.
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// All records in date order.
    #[must_use]
    pub fn records(&self) -> &[TallyRecord] {
        &self.records
    }

    /// Record at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TallyRecord> {
        self.records.get(index)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Date of the newest record.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(TallyRecord::date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Person;
    use crate::roster::PersonId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn person(name: &str, born: NaiveDate) -> Person {
        Person::new(name, born, None, []).unwrap()
    }

    #[test]
    fn single_person_three_days() {
        let roster = Roster::new(vec![person("solo", date(2000, 1, 1))]);
        let wall = TallyWall::generate(roster, Granularity::Day, date(2000, 1, 3));

        assert_eq!(wall.len(), 3);
        let dates: Vec<_> = wall.records().iter().map(TallyRecord::date).collect();
        assert_eq!(dates, [date(2000, 1, 1), date(2000, 1, 2), date(2000, 1, 3)]);
        for record in wall.records() {
            assert_eq!(record.alive().as_slice(), &[PersonId(0)]);
        }
    }

    #[test]
    fn today_before_start_is_empty() {
        let roster = Roster::new(vec![person("solo", date(2000, 1, 1))]);
        let wall = TallyWall::generate(roster, Granularity::Day, date(1999, 12, 31));
        assert!(wall.is_empty());
        assert_eq!(wall.last_date(), None);
    }

    #[test]
    fn empty_roster_is_empty() {
        let mut wall = TallyWall::generate(Roster::default(), Granularity::Day, date(2000, 1, 1));
        assert!(wall.is_empty());
        assert_eq!(wall.advance_to(date(2030, 1, 1)), 0);
    }

    #[test]
    fn alive_counts_never_shrink_without_deaths() {
        let roster = Roster::new(vec![
            person("c", date(2000, 3, 1)),
            person("a", date(2000, 1, 1)),
            person("b", date(2000, 2, 1)),
        ]);
        let wall = TallyWall::generate(roster, Granularity::Day, date(2000, 4, 1));
        let counts: Vec<_> = wall.records().iter().map(|r| r.alive().len()).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(counts.first(), Some(&1));
        assert_eq!(counts.last(), Some(&3));
    }

    #[test]
    fn advance_appends_only_new_days() {
        let roster = Roster::new(vec![person("solo", date(2000, 1, 1))]);
        let mut wall = TallyWall::generate(roster.clone(), Granularity::Day, date(2000, 1, 3));

        assert_eq!(wall.advance_to(date(2000, 1, 3)), 0);
        assert_eq!(wall.advance_to(date(2000, 1, 2)), 0);
        assert_eq!(wall.advance_to(date(2000, 1, 5)), 2);
        assert_eq!(wall.last_date(), Some(date(2000, 1, 5)));

        let fresh = TallyWall::generate(roster, Granularity::Day, date(2000, 1, 5));
        assert_eq!(wall, fresh);
    }

    #[test]
    fn yearly_wall_uses_anniversaries() {
        let roster = Roster::new(vec![
            person("parent", date(1969, 5, 25)),
            person("child", date(2004, 8, 7)),
        ]);
        let wall = TallyWall::generate(roster, Granularity::Year, date(2026, 10, 16));
        assert_eq!(wall.len(), 58);
        assert_eq!(wall.get(0).unwrap().date(), date(1969, 5, 25));
        // 2004-05-25 precedes the child's birth, 2005-05-25 does not.
        assert_eq!(wall.get(35).unwrap().alive().len(), 1);
        assert_eq!(wall.get(36).unwrap().alive().len(), 2);
    }
}
