// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::num::NonZeroUsize;
use core::ops::Range;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Horizontal distance between neighbouring cells, in world units.
pub const DEFAULT_CELL_WIDTH: f64 = 35.0;
/// Vertical distance between rows, in world units.
pub const DEFAULT_ROW_HEIGHT: f64 = 100.0;
/// Space kept free on the right of the surface when wrapping rows.
pub const DEFAULT_WRAP_MARGIN: f64 = 100.0;

/// Row and column of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Zero‑based row.
    pub row: usize,
    /// Zero‑based column.
    pub col: usize,
}

/// Size of one mark, and how far each additional stroke is shifted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkMetrics {
    /// Hit box width, from the record origin.
    pub width: f64,
    /// Hit box height, from the record origin.
    pub height: f64,
    /// Horizontal shift between the strokes of consecutive people.
    pub advance: f64,
}

impl Default for MarkMetrics {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 70.0,
            advance: 8.0,
        }
    }
}

impl MarkMetrics {
    /// Hit box of a mark at `origin`.
    #[must_use]
    pub fn hit_box(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, Size::new(self.width, self.height))
    }

    /// Strict containment: points on the edge of the box miss.
    #[must_use]
    pub fn hits(&self, origin: Point, pt: Point) -> bool {
        pt.x > origin.x
            && pt.x < origin.x + self.width
            && pt.y > origin.y
            && pt.y < origin.y + self.height
    }
}

/// How many records go on one row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RowPolicy {
    /// Always the same number of records per row.
    Fixed(NonZeroUsize),
    /// As many as fit into the surface width minus `margin`.
    WrapToWidth {
        /// Width kept free on the right.
        margin: f64,
    },
}

impl Default for RowPolicy {
    fn default() -> Self {
        Self::WrapToWidth {
            margin: DEFAULT_WRAP_MARGIN,
        }
    }
}

/// Grid placement of records by sequential index.
///
/// Record `i` sits in row `i / n`, column `i % n`, where `n` is the number
/// of items per row; its origin is `(col * cell_width, row * row_height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    items_per_row: NonZeroUsize,
    cell_width: f64,
    row_height: f64,
}

impl Layout {
    /// A layout with `items_per_row` and the default cell size.
    #[must_use]
    pub fn new(items_per_row: NonZeroUsize) -> Self {
        Self {
            items_per_row,
            cell_width: DEFAULT_CELL_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }

    /// Replaces the cell size. Non‑positive values are ignored.
    #[must_use]
    pub fn with_cell_size(mut self, cell_width: f64, row_height: f64) -> Self {
        if cell_width > 0.0 {
            self.cell_width = cell_width;
        }
        if row_height > 0.0 {
            self.row_height = row_height;
        }
        self
    }

    /// Items per row such that a row wraps once the next x would exceed
    /// `wrap_width`.
    ///
    /// Cells start at `x = 0` and advance by `cell_width`, so the row holds
    /// `floor(wrap_width / cell_width) + 1` items. A negative or non‑finite
    /// wrap width puts every record on its own row.
    #[must_use]
    pub fn items_for_wrap_width(wrap_width: f64, cell_width: f64) -> NonZeroUsize {
        if !(wrap_width.is_finite() && cell_width > 0.0) || wrap_width < 0.0 {
            return NonZeroUsize::MIN;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "non-negative and finite; saturates on absurd widths"
        )]
        let fits = (wrap_width / cell_width).floor() as usize;
        NonZeroUsize::new(fits.saturating_add(1)).unwrap_or(NonZeroUsize::MIN)
    }

    /// Resolves `policy` for a surface `surface_width` wide.
    #[must_use]
    pub fn resolve(
        policy: RowPolicy,
        surface_width: f64,
        cell_width: f64,
        row_height: f64,
    ) -> Self {
        let items_per_row = match policy {
            RowPolicy::Fixed(n) => n,
            RowPolicy::WrapToWidth { margin } => {
                Self::items_for_wrap_width(surface_width - margin, cell_width)
            }
        };
        Self::new(items_per_row).with_cell_size(cell_width, row_height)
    }

    /// Records per row.
    #[must_use]
    pub fn items_per_row(&self) -> usize {
        self.items_per_row.get()
    }

    /// Horizontal cell spacing.
    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Vertical row spacing.
    #[must_use]
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Cell of record `index`.
    #[must_use]
    pub fn cell(&self, index: usize) -> GridCell {
        let n = self.items_per_row.get();
        GridCell {
            row: index / n,
            col: index % n,
        }
    }

    /// Index of the record in `cell`, if the column exists.
    #[must_use]
    pub fn index(&self, cell: GridCell) -> Option<usize> {
        let n = self.items_per_row.get();
        if cell.col >= n {
            return None;
        }
        cell.row.checked_mul(n)?.checked_add(cell.col)
    }

    /// World position of the top‑left corner of record `index`.
    #[must_use]
    pub fn origin(&self, index: usize) -> Point {
        let cell = self.cell(index);
        Point::new(
            to_f64(cell.col) * self.cell_width,
            to_f64(cell.row) * self.row_height,
        )
    }

    /// Number of rows needed for `len` records.
    #[must_use]
    pub fn rows(&self, len: usize) -> usize {
        len.div_ceil(self.items_per_row.get())
    }

    /// Indices of the records in `row`, for a wall of `len` records.
    #[must_use]
    pub fn row_range(&self, row: usize, len: usize) -> Range<usize> {
        let n = self.items_per_row.get();
        let start = row.saturating_mul(n).min(len);
        let end = start.saturating_add(n).min(len);
        start..end
    }

    /// World bounds of `len` records whose marks are `mark` sized.
    #[must_use]
    pub fn bounds(&self, len: usize, mark: &MarkMetrics) -> Rect {
        if len == 0 {
            return Rect::ZERO;
        }
        let cols = len.min(self.items_per_row.get());
        let rows = self.rows(len);
        Rect::new(
            0.0,
            0.0,
            to_f64(cols - 1) * self.cell_width + mark.width,
            to_f64(rows - 1) * self.row_height + mark.height,
        )
    }

    /// Records of a `len` long wall whose hit boxes may touch `rect`.
    ///
    /// Indices are ascending. The result is a superset: callers doing exact
    /// tests still check each candidate.
    #[must_use]
    pub fn candidates(&self, rect: Rect, len: usize, mark: &MarkMetrics) -> Vec<usize> {
        let rect = rect.abs();
        if len == 0 || rect.x1 < 0.0 || rect.y1 < 0.0 {
            return Vec::new();
        }
        let n = self.items_per_row.get();
        let last_row = self.rows(len) - 1;
        let row_lo = floor_index((rect.y0 - mark.height) / self.row_height);
        let row_hi = floor_index(rect.y1 / self.row_height).min(last_row);
        let col_lo = floor_index((rect.x0 - mark.width) / self.cell_width);
        let col_hi = floor_index(rect.x1 / self.cell_width).min(n - 1);
        if row_lo > row_hi || col_lo > col_hi {
            return Vec::new();
        }

        let mut out = Vec::new();
        for row in row_lo..=row_hi {
            let range = self.row_range(row, len);
            let start = range.start + col_lo;
            let end = (range.start + col_hi + 1).min(range.end);
            out.extend(start..end);
        }
        out
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "record counts stay far below 2^52"
)]
fn to_f64(v: usize) -> f64 {
    v as f64
}

/// `floor(v)` as an index, with negative and NaN values mapped to zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "positive; saturates on overflow"
)]
fn floor_index(v: f64) -> usize {
    if v.is_nan() || v <= 0.0 {
        return 0;
    }
    v.floor() as usize
}
