// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::NaiveDate;
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Colors a person's marks are drawn with, cycled by record index.
pub type Palette = SmallVec<[Color; 2]>;

/// Ink used for marks without an explicit color.
#[must_use]
pub fn default_ink() -> Color {
    Color::from_rgba8(0x33, 0x33, 0x33, 0xff)
}

/// Parses a CSS color string (`#rgb`, `#rrggbb`, `rgb(...)`, named colors, ...).
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] naming `owner` when the string is not a color.
pub fn parse_css_color(owner: &str, value: &str) -> Result<Color> {
    parse_color(value.trim())
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|e| Error::invalid_color(owner, value, e.to_string()))
}

/// Someone whose lifetime is tallied on the wall.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    name: String,
    born: NaiveDate,
    died: Option<NaiveDate>,
    palette: Palette,
}

impl Person {
    /// Creates a person.
    ///
    /// An empty palette falls back to [`default_ink`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeathBeforeBirth`] when `died < born`.
    pub fn new(
        name: impl Into<String>,
        born: NaiveDate,
        died: Option<NaiveDate>,
        palette: impl IntoIterator<Item = Color>,
    ) -> Result<Self> {
        let name = name.into();
        if let Some(died) = died
            && died < born
        {
            return Err(Error::DeathBeforeBirth { name, born, died });
        }
        let mut palette: Palette = palette.into_iter().collect();
        if palette.is_empty() {
            palette.push(default_ink());
        }
        Ok(Self {
            name,
            born,
            died,
            palette,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Date of birth.
    #[must_use]
    pub fn born(&self) -> NaiveDate {
        self.born
    }

    /// Date of death, if any.
    #[must_use]
    pub fn died(&self) -> Option<NaiveDate> {
        self.died
    }

    /// All colors of this person, never empty.
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Color used for the mark of record `index`.
    #[must_use]
    pub fn color_for(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }

    /// Alive on `date`: born on or before it, and not yet dead.
    ///
    /// The day of death itself no longer counts.
    #[must_use]
    pub fn is_alive_on(&self, date: NaiveDate) -> bool {
        self.born <= date && self.died.is_none_or(|died| date < died)
    }
}
