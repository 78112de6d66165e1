// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::NaiveDate;
use smallvec::SmallVec;

use crate::person::Person;

/// Index of a person inside a [`Roster`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(pub usize);

/// People alive on some date, in roster (birth) order.
pub type AliveSet = SmallVec<[PersonId; 8]>;

/// People on a wall, ordered by date of birth.
///
/// Ties keep their input order. A [`PersonId`] is the position in this order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    /// Builds a roster, sorting people by date of birth.
    #[must_use]
    pub fn new(mut people: Vec<Person>) -> Self {
        people.sort_by_key(Person::born);
        Self { people }
    }

    /// Number of people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Returns `true` if nobody is on the roster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Person with the given id.
    #[must_use]
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.0)
    }

    /// All people in birth order.
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Iterates people with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Person)> + '_ {
        self.people.iter().enumerate().map(|(i, p)| (PersonId(i), p))
    }

    /// The first birth date; the wall starts here.
    #[must_use]
    pub fn earliest_birth(&self) -> Option<NaiveDate> {
        self.people.first().map(Person::born)
    }

    /// People alive on `date`, in birth order.
    #[must_use]
    pub fn alive_on(&self, date: NaiveDate) -> AliveSet {
        self.iter()
            // Sorted by birth: nobody after the first unborn person is alive.
            .take_while(|(_, p)| p.born() <= date)
            .filter(|(_, p)| p.is_alive_on(date))
            .map(|(id, _)| id)
            .collect()
    }
}
