// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Cap};

/// Default stroke width of a tally stroke.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// The hand‑drawn stroke used for one person on one record.
///
/// A slightly wavy vertical line inside the `40 × 70` mark box.
#[must_use]
pub fn tally_stroke_path() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((10.0, 5.0));
    path.curve_to((18.0, 25.0), (2.0, 45.0), (10.0, 65.0));
    path
}

/// Shape and stroke of a single tally stroke, in mark‑local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkStyle {
    /// Outline of the stroke.
    pub path: BezPath,
    /// Line width.
    pub stroke_width: f64,
    /// Line ends.
    pub cap: Cap,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            path: tally_stroke_path(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            cap: Cap::Round,
        }
    }
}

impl MarkStyle {
    /// Replaces the line width.
    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub(crate) fn cap_name(&self) -> &'static str {
        match self.cap {
            Cap::Butt => "butt",
            Cap::Square => "square",
            Cap::Round => "round",
        }
    }
}
