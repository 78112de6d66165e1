// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON data files.
//!
//! A data file holds either people, from which a wall is generated, or
//! precomputed tallies that are drawn as they are:
//!
//! ```json
//! { "people": [{ "name": "Ada", "dob": "1815-12-10", "dod": "1852-11-27", "color": "#1e3a8a" }] }
//! { "tallies": [{ "x": 0, "y": 0, "count": 3, "label": "first" }] }
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::granularity::Granularity;
use crate::layout::{DEFAULT_CELL_WIDTH, DEFAULT_ROW_HEIGHT, MarkMetrics, RowPolicy};
use crate::person::{Person, parse_css_color};
use crate::roster::Roster;
use crate::sheet::{GridSheet, PrecomputedSheet, PrecomputedTally, Sheet};
use crate::wall::TallyWall;

/// A small family, used when no data file is configured.
pub const DEMO_DATA: &str = r##"{
  "people": [
    { "name": "Grandmother", "dob": "1938-02-01", "color": "#2d5a27" },
    { "name": "Father", "dob": "1969-05-25", "color": "#1e3a8a" },
    { "name": "Mother", "dob": "1980-01-29", "color": "#9a3412" },
    { "name": "Aunt", "dob": "1985-02-07", "color": "#5b21b6" },
    { "name": "Samip", "dob": "2004-08-07", "color": "#0369a1" },
    { "name": "Kabir", "dob": "2005-04-05", "color": "#854d0e" },
    { "name": "Sangram", "dob": "2008-05-07", "color": "#9d174d" }
  ]
}"##;

#[derive(Deserialize)]
struct RawDataFile {
    #[serde(default)]
    people: Option<Vec<PersonEntry>>,
    #[serde(default)]
    tallies: Option<Vec<PrecomputedTally>>,
}

#[derive(Deserialize)]
struct PersonEntry {
    name: String,
    dob: NaiveDate,
    #[serde(default, alias = "death")]
    dod: Option<NaiveDate>,
    #[serde(default)]
    color: Option<ColorSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    One(String),
    Many(Vec<String>),
}

impl PersonEntry {
    fn into_person(self) -> Result<Person> {
        let specs = match self.color {
            None => Vec::new(),
            Some(ColorSpec::One(s)) => vec![s],
            Some(ColorSpec::Many(v)) => v,
        };
        let palette = specs
            .iter()
            .map(|s| parse_css_color(&self.name, s))
            .collect::<Result<Vec<_>>>()?;
        Person::new(self.name, self.dob, self.dod, palette)
    }
}

/// The contents of a data file.
#[derive(Clone, Debug, PartialEq)]
pub enum DataFile {
    /// People to generate a wall from.
    People(Vec<Person>),
    /// Records to draw verbatim.
    Tallies(Vec<PrecomputedTally>),
}

/// How a [`DataFile`] becomes a [`Sheet`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetSettings {
    /// What one record stands for.
    pub granularity: Granularity,
    /// Records per row.
    pub policy: RowPolicy,
    /// Horizontal cell spacing.
    pub cell_width: f64,
    /// Vertical row spacing.
    pub row_height: f64,
    /// Mark size and stroke advance.
    pub metrics: MarkMetrics,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            granularity: Granularity::Day,
            policy: RowPolicy::default(),
            cell_width: DEFAULT_CELL_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            metrics: MarkMetrics::default(),
        }
    }
}

impl DataFile {
    /// Parses a data file.
    ///
    /// `people` wins when both lists are present.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, bad colors, a death before birth, or when
    /// neither list is present.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDataFile = serde_json::from_str(json)?;
        match (raw.people, raw.tallies) {
            (Some(people), _) => {
                let people = people
                    .into_iter()
                    .map(PersonEntry::into_person)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::People(people))
            }
            (None, Some(tallies)) => Ok(Self::Tallies(tallies)),
            (None, None) => Err(Error::UnrecognizedData),
        }
    }

    /// Reads and parses the data file at `path`.
    ///
    /// # Errors
    ///
    /// See [`DataFile::from_json`]; also fails when the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), records = data.len(), "loaded data file");
        Ok(data)
    }

    /// The built-in demo family.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the demo data is checked by tests.
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_DATA)
    }

    /// Number of people or tallies.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::People(people) => people.len(),
            Self::Tallies(tallies) => tallies.len(),
        }
    }

    /// Returns `true` if the file lists nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a sheet for a surface `surface_width` wide as of `today`.
    #[must_use]
    pub fn into_sheet(
        self,
        settings: &SheetSettings,
        today: NaiveDate,
        surface_width: f64,
    ) -> Box<dyn Sheet> {
        match self {
            Self::People(people) => {
                let wall = TallyWall::generate(Roster::new(people), settings.granularity, today);
                Box::new(GridSheet::new(
                    wall,
                    settings.policy,
                    surface_width,
                    settings.cell_width,
                    settings.row_height,
                    settings.metrics,
                ))
            }
            Self::Tallies(tallies) => Box::new(PrecomputedSheet::new(tallies, settings.metrics)),
        }
    }
}
