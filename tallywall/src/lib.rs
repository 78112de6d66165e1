// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `tallywall`: render and explore a tally wall from the command line.
//!
//! This crate ties the model, camera and SVG crates together:
//! - [`Config`]: layered configuration (defaults, TOML, environment).
//! - [`Session`]: a sheet under a camera, driven by [`Event`]s for wheel
//!   zoom, drag‑to‑pan, hover tooltips, resizes and day changes.
//! - [`watch::Watcher`]: re-renders a file whenever the date changes.
//! - [`cli`]: the `tallywall` command line.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kurbo::Point;
//! use tallywall::{Config, Event, Session};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let mut session = Session::from_config(&Config::default(), today);
//!
//! // Hovering the first mark shows who was alive on the first day.
//! assert!(session.handle(Event::PointerMove { pos: Point::new(60.0, 60.0) }));
//! assert_eq!(session.tooltip().unwrap().caption.body, "Grandmother");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod session;
pub mod watch;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use session::{Event, Session, load_or_empty, read_events};
