// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tally Wall SVG: draws a tally wall through a pan/zoom camera.
//!
//! [`SvgRenderer`] takes any [`Sheet`](tallywall_model::Sheet), a
//! [`Camera`](tallywall_view2d::Camera) and a surface size, and produces a
//! standalone SVG document:
//! - a background rectangle covering the surface,
//! - one prebuilt stroke per ink in `<defs>`, referenced by `<use>`,
//! - a single group carrying the camera transform,
//! - an optional [`Tooltip`] in surface coordinates on top.
//!
//! Only records near the visible area are emitted.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kurbo::Size;
//! use tallywall_model::{DataFile, SheetSettings};
//! use tallywall_svg::SvgRenderer;
//! use tallywall_view2d::Camera;
//!
//! let sheet = DataFile::from_json(r#"{"people": [{"name": "Ada", "dob": "2000-01-01"}]}"#)
//!     .unwrap()
//!     .into_sheet(
//!         &SheetSettings::default(),
//!         NaiveDate::from_ymd_opt(2000, 1, 5).unwrap(),
//!         800.0,
//!     );
//! let svg = SvgRenderer::new().render(
//!     sheet.as_ref(),
//!     &Camera::default(),
//!     Size::new(800.0, 600.0),
//!     None,
//! );
//! assert_eq!(svg.matches("<use ").count(), 5);
//! ```

mod format;
mod mark;
mod renderer;
mod tooltip;

pub use mark::{DEFAULT_STROKE_WIDTH, MarkStyle, tally_stroke_path};
pub use renderer::{DEFAULT_BACKGROUND, DEFAULT_CULL_MARGIN, RenderStats, SvgRenderer};
pub use tooltip::{TOOLTIP_OFFSET, Tooltip};
