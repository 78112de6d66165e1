// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for loading and validating tally data.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced while loading people or precomputed tallies.
#[derive(Error, Debug)]
pub enum Error {
    /// The data file could not be read.
    #[error("failed to read data file {path}: {source}")]
    Read {
        /// Path of the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The data file is not valid JSON or has the wrong shape.
    #[error("malformed data file: {0}")]
    Json(#[from] serde_json::Error),

    /// The data file holds neither `people` nor `tallies`.
    #[error("data file has neither a `people` nor a `tallies` list")]
    UnrecognizedData,

    /// A color string could not be parsed.
    #[error("invalid color {value:?} for {owner}: {message}")]
    InvalidColor {
        /// Who the color belongs to.
        owner: String,
        /// The rejected color string.
        value: String,
        /// Parser message.
        message: String,
    },

    /// A person's death date precedes their birth date.
    #[error("{name} dies on {died} before being born on {born}")]
    DeathBeforeBirth {
        /// Name of the person.
        name: String,
        /// Date of birth.
        born: NaiveDate,
        /// Date of death.
        died: NaiveDate,
    },

    /// An unknown granularity name.
    #[error("unknown granularity {0:?}, expected `day` or `year`")]
    UnknownGranularity(String),
}

/// A specialized Result type for tally model operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid color error.
    #[must_use]
    pub fn invalid_color(
        owner: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidColor {
            owner: owner.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_color_display_names_owner_and_value() {
        let err = Error::invalid_color("Mother", "#zzz", "bad hex");
        let msg = err.to_string();
        assert!(msg.contains("Mother"));
        assert!(msg.contains("#zzz"));
        assert!(msg.contains("bad hex"));
    }

    #[test]
    fn death_before_birth_display() {
        let err = Error::DeathBeforeBirth {
            name: "Ada".to_string(),
            born: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            died: NaiveDate::from_ymd_opt(1800, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Ada dies on 1800-01-01 before being born on 1815-12-10"
        );
    }

    #[test]
    fn from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
