// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tally Wall Model: people, tally generation, grid layout and hit testing.
//!
//! A tally wall draws one mark for every day (or year) since the earliest
//! birth on a [`Roster`], annotated with the people alive on that date.
//!
//! - [`Person`] and [`Roster`]: who is tallied, sorted by date of birth.
//! - [`TallyWall`]: the generated records, extended in place by
//!   [`TallyWall::advance_to`] when the date changes.
//! - [`Layout`]: places record `i` at row `i / n`, column `i % n`.
//! - [`Sheet`]: anything drawable as a wall, with culling queries and
//!   hit testing. [`GridSheet`] wraps a generated wall, [`PrecomputedSheet`]
//!   a list of tallies read from disk.
//! - [`DataFile`]: JSON loading.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kurbo::Point;
//! use tallywall_model::{DataFile, Sheet, SheetSettings};
//!
//! let data = DataFile::from_json(
//!     r#"{"people": [{"name": "Ada", "dob": "2000-01-01", "color": "navy"}]}"#,
//! )
//! .unwrap();
//! let today = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
//! let sheet = data.into_sheet(&SheetSettings::default(), today, 1280.0);
//!
//! // Start and end dates both count.
//! assert_eq!(sheet.len(), 3);
//!
//! // The second mark sits one cell to the right of the first.
//! let hit = sheet.hit_test(Point::new(50.0, 30.0)).unwrap();
//! assert_eq!(hit, 1);
//! assert_eq!(sheet.caption(hit).unwrap().to_string(), "Sun Jan 02 2000\nAda");
//! ```

mod data;
mod error;
mod granularity;
mod layout;
mod person;
mod roster;
mod sheet;
mod wall;

pub use data::{DEMO_DATA, DataFile, SheetSettings};
pub use error::{Error, Result};
pub use granularity::Granularity;
pub use layout::{
    DEFAULT_CELL_WIDTH, DEFAULT_ROW_HEIGHT, DEFAULT_WRAP_MARGIN, GridCell, Layout, MarkMetrics,
    RowPolicy,
};
pub use person::{Palette, Person, default_ink, parse_css_color};
pub use roster::{AliveSet, PersonId, Roster};
pub use sheet::{
    CAPTION_DATE_FORMAT, Caption, EmptySheet, GridSheet, MAX_PRECOMPUTED_STROKES, PrecomputedSheet,
    PrecomputedTally, Sheet, Strokes,
};
pub use wall::{TallyRecord, TallyWall};
