// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Things that can be drawn as a wall of tally marks.
//!
//! A [`Sheet`] knows where each record sits in world space, which colors
//! its strokes use, and what its tooltip says. Renderers and hit testing
//! only go through this trait, so a generated [`GridSheet`] and a
//! [`PrecomputedSheet`] read from disk are interchangeable.

use core::fmt;

use chrono::NaiveDate;
use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::layout::{Layout, MarkMetrics, RowPolicy};
use crate::person::default_ink;
use crate::wall::TallyWall;

/// Stroke colors of one record, one entry per stroke.
pub type Strokes = SmallVec<[Color; 8]>;

/// Most strokes a precomputed record is drawn with; larger counts are clamped.
pub const MAX_PRECOMPUTED_STROKES: u32 = 1000;

/// Format of record dates in captions, e.g. `Sat Jan 01 2000`.
pub const CAPTION_DATE_FORMAT: &str = "%a %b %d %Y";

/// Tooltip content of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caption {
    /// Emphasized first line.
    pub title: String,
    /// Second line; empty when nothing else is known.
    pub body: String,
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        if !self.body.is_empty() {
            write!(f, "\n{}", self.body)?;
        }
        Ok(())
    }
}

/// A drawable, hit‑testable collection of tally records.
pub trait Sheet: fmt::Debug {
    /// Number of records.
    fn len(&self) -> usize;

    /// Returns `true` if there is nothing to draw.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark size and stroke advance.
    fn metrics(&self) -> MarkMetrics;

    /// World position of the top‑left corner of record `index`.
    fn origin(&self, index: usize) -> Option<Point>;

    /// Stroke colors of record `index`, left to right.
    fn strokes(&self, index: usize) -> Strokes;

    /// Number of strokes of record `index`, without collecting their colors.
    fn stroke_count(&self, index: usize) -> usize {
        self.strokes(index).len()
    }

    /// Tooltip content of record `index`.
    fn caption(&self, index: usize) -> Option<Caption>;

    /// Ascending indices of records whose hit boxes may touch `world`.
    fn candidates(&self, world: Rect) -> Vec<usize>;

    /// World bounds of all records.
    fn bounds(&self) -> Rect;

    /// Lowest index whose hit box strictly contains `world_pt`.
    fn hit_test(&self, world_pt: Point) -> Option<usize> {
        let metrics = self.metrics();
        self.candidates(Rect::from_points(world_pt, world_pt))
            .into_iter()
            .find(|&i| self.origin(i).is_some_and(|o| metrics.hits(o, world_pt)))
    }

    /// Adapts the layout to a surface `surface_width` wide.
    ///
    /// Returns `true` when record positions changed.
    fn relayout(&mut self, surface_width: f64) -> bool {
        let _ = surface_width;
        false
    }

    /// Brings the sheet up to `today`, returning how many records were added.
    fn advance_to(&mut self, today: NaiveDate) -> usize {
        let _ = today;
        0
    }
}

/// A generated [`TallyWall`] placed on a grid.
#[derive(Clone, Debug)]
pub struct GridSheet {
    wall: TallyWall,
    policy: RowPolicy,
    layout: Layout,
    metrics: MarkMetrics,
}

impl GridSheet {
    /// Places `wall` with `policy` on a surface `surface_width` wide.
    #[must_use]
    pub fn new(
        wall: TallyWall,
        policy: RowPolicy,
        surface_width: f64,
        cell_width: f64,
        row_height: f64,
        metrics: MarkMetrics,
    ) -> Self {
        Self {
            wall,
            policy,
            layout: Layout::resolve(policy, surface_width, cell_width, row_height),
            metrics,
        }
    }

    /// The records.
    #[must_use]
    pub fn wall(&self) -> &TallyWall {
        &self.wall
    }

    /// The current grid.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

impl Sheet for GridSheet {
    fn len(&self) -> usize {
        self.wall.len()
    }

    fn metrics(&self) -> MarkMetrics {
        self.metrics
    }

    fn origin(&self, index: usize) -> Option<Point> {
        (index < self.wall.len()).then(|| self.layout.origin(index))
    }

    fn strokes(&self, index: usize) -> Strokes {
        let Some(record) = self.wall.get(index) else {
            return Strokes::new();
        };
        let roster = self.wall.roster();
        record
            .alive()
            .iter()
            .filter_map(|&id| roster.get(id))
            .map(|p| p.color_for(index))
            .collect()
    }

    fn stroke_count(&self, index: usize) -> usize {
        self.wall.get(index).map_or(0, |record| record.alive().len())
    }

    fn caption(&self, index: usize) -> Option<Caption> {
        let record = self.wall.get(index)?;
        let roster = self.wall.roster();
        let names: Vec<&str> = record
            .alive()
            .iter()
            .filter_map(|&id| roster.get(id))
            .map(|p| p.name())
            .collect();
        Some(Caption {
            title: record.date().format(CAPTION_DATE_FORMAT).to_string(),
            body: names.join(", "),
        })
    }

    fn candidates(&self, world: Rect) -> Vec<usize> {
        self.layout
            .candidates(world, self.wall.len(), &self.metrics)
    }

    fn bounds(&self) -> Rect {
        self.layout.bounds(self.wall.len(), &self.metrics)
    }

    fn relayout(&mut self, surface_width: f64) -> bool {
        let layout = Layout::resolve(
            self.policy,
            surface_width,
            self.layout.cell_width(),
            self.layout.row_height(),
        );
        if layout == self.layout {
            return false;
        }
        tracing::debug!(
            items_per_row = layout.items_per_row(),
            surface_width,
            "relayout"
        );
        self.layout = layout;
        true
    }

    fn advance_to(&mut self, today: NaiveDate) -> usize {
        self.wall.advance_to(today)
    }
}

/// A record read verbatim from a data file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrecomputedTally {
    /// World x of the mark.
    pub x: f64,
    /// World y of the mark.
    pub y: f64,
    /// Number of strokes.
    #[serde(alias = "value", default)]
    pub count: u32,
    /// Tooltip text.
    #[serde(default)]
    pub label: String,
}

/// Precomputed records, drawn in a single ink.
#[derive(Clone, Debug)]
pub struct PrecomputedSheet {
    tallies: Vec<PrecomputedTally>,
    ink: Color,
    metrics: MarkMetrics,
}

impl PrecomputedSheet {
    /// Wraps `tallies`, drawn with the default ink.
    ///
    /// Counts above [`MAX_PRECOMPUTED_STROKES`] are clamped.
    #[must_use]
    pub fn new(mut tallies: Vec<PrecomputedTally>, metrics: MarkMetrics) -> Self {
        for (index, tally) in tallies.iter_mut().enumerate() {
            if tally.count > MAX_PRECOMPUTED_STROKES {
                tracing::warn!(
                    index,
                    count = tally.count,
                    max = MAX_PRECOMPUTED_STROKES,
                    "stroke count clamped"
                );
                tally.count = MAX_PRECOMPUTED_STROKES;
            }
        }
        Self {
            tallies,
            ink: default_ink(),
            metrics,
        }
    }

    /// Replaces the ink.
    #[must_use]
    pub fn with_ink(mut self, ink: Color) -> Self {
        self.ink = ink;
        self
    }

    /// The records.
    #[must_use]
    pub fn tallies(&self) -> &[PrecomputedTally] {
        &self.tallies
    }
}

impl Sheet for PrecomputedSheet {
    fn len(&self) -> usize {
        self.tallies.len()
    }

    fn metrics(&self) -> MarkMetrics {
        self.metrics
    }

    fn origin(&self, index: usize) -> Option<Point> {
        self.tallies.get(index).map(|t| Point::new(t.x, t.y))
    }

    fn strokes(&self, index: usize) -> Strokes {
        (0..self.stroke_count(index)).map(|_| self.ink).collect()
    }

    fn stroke_count(&self, index: usize) -> usize {
        self.tallies
            .get(index)
            .map_or(0, |t| usize::try_from(t.count).unwrap_or(usize::MAX))
    }

    fn caption(&self, index: usize) -> Option<Caption> {
        let tally = self.tallies.get(index)?;
        Some(Caption {
            title: tally.label.clone(),
            body: String::new(),
        })
    }

    fn candidates(&self, world: Rect) -> Vec<usize> {
        let world = world.abs();
        self.tallies
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                let hit_box = self.metrics.hit_box(Point::new(t.x, t.y));
                hit_box.x1 >= world.x0
                    && hit_box.x0 <= world.x1
                    && hit_box.y1 >= world.y0
                    && hit_box.y0 <= world.y1
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn bounds(&self) -> Rect {
        self.tallies
            .iter()
            .map(|t| self.metrics.hit_box(Point::new(t.x, t.y)))
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }
}

/// Nothing to draw; what a failed load leaves behind.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySheet;

impl Sheet for EmptySheet {
    fn len(&self) -> usize {
        0
    }

    fn metrics(&self) -> MarkMetrics {
        MarkMetrics::default()
    }

    fn origin(&self, _index: usize) -> Option<Point> {
        None
    }

    fn strokes(&self, _index: usize) -> Strokes {
        Strokes::new()
    }

    fn caption(&self, _index: usize) -> Option<Caption> {
        None
    }

    fn candidates(&self, _world: Rect) -> Vec<usize> {
        Vec::new()
    }

    fn bounds(&self) -> Rect {
        Rect::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::granularity::Granularity;
    use crate::layout::{DEFAULT_CELL_WIDTH, DEFAULT_ROW_HEIGHT};
    use crate::person::{Person, parse_css_color};
    use crate::roster::Roster;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn family_sheet(surface_width: f64) -> GridSheet {
        let red = parse_css_color("a", "#ff0000").unwrap();
        let blue = parse_css_color("b", "#0000ff").unwrap();
        let roster = Roster::new(vec![
            Person::new("Bea", date(2000, 1, 3), None, [blue]).unwrap(),
            Person::new("Al", date(2000, 1, 1), None, [red]).unwrap(),
        ]);
        let wall = TallyWall::generate(roster, Granularity::Day, date(2000, 1, 10));
        GridSheet::new(
            wall,
            RowPolicy::default(),
            surface_width,
            DEFAULT_CELL_WIDTH,
            DEFAULT_ROW_HEIGHT,
            MarkMetrics::default(),
        )
    }

    #[test]
    fn captions_list_date_and_alive_names() {
        let sheet = family_sheet(1280.0);
        let first = sheet.caption(0).unwrap();
        assert_eq!(first.title, "Sat Jan 01 2000");
        assert_eq!(first.body, "Al");
        assert_eq!(sheet.caption(2).unwrap().to_string(), "Mon Jan 03 2000\nAl, Bea");
        assert_eq!(sheet.caption(10), None);
    }

    #[test]
    fn strokes_follow_alive_people() {
        let sheet = family_sheet(1280.0);
        assert_eq!(sheet.strokes(0).len(), 1);
        let strokes = sheet.strokes(5);
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].to_rgba8().r, 0xff);
        assert_eq!(strokes[1].to_rgba8().b, 0xff);
        assert!(sheet.strokes(99).is_empty());
    }

    #[test]
    fn hit_test_prefers_lowest_index_in_overlap() {
        let sheet = family_sheet(1280.0);
        // Boxes of record 0 (0..40) and record 1 (35..75) overlap at x = 37.
        assert_eq!(sheet.hit_test(Point::new(37.0, 10.0)), Some(0));
        assert_eq!(sheet.hit_test(Point::new(41.0, 10.0)), Some(1));
        // Edges and gaps miss.
        assert_eq!(sheet.hit_test(Point::new(0.0, 10.0)), None);
        assert_eq!(sheet.hit_test(Point::new(10.0, 85.0)), None);
        assert_eq!(sheet.hit_test(Point::new(-5.0, -5.0)), None);
    }

    #[test]
    fn relayout_moves_records_between_rows() {
        let mut sheet = family_sheet(1280.0);
        assert_eq!(sheet.origin(9), Some(Point::new(315.0, 0.0)));

        // 205 - 100 = 105: four records per row.
        assert!(sheet.relayout(205.0));
        assert_eq!(sheet.layout().items_per_row(), 4);
        assert_eq!(sheet.origin(9), Some(Point::new(35.0, 200.0)));
        assert!(!sheet.relayout(205.0));
    }

    #[test]
    fn advance_extends_grid_sheet() {
        let mut sheet = family_sheet(1280.0);
        assert_eq!(sheet.advance_to(date(2000, 1, 12)), 2);
        assert_eq!(sheet.len(), 12);
        assert_eq!(sheet.bounds(), Rect::new(0.0, 0.0, 425.0, 70.0));
    }

    #[test]
    fn precomputed_sheet_hit_tests_linearly() {
        let sheet = PrecomputedSheet::new(
            vec![
                PrecomputedTally {
                    x: 0.0,
                    y: 0.0,
                    count: 3,
                    label: "first".into(),
                },
                PrecomputedTally {
                    x: 20.0,
                    y: 0.0,
                    count: 1,
                    label: "second".into(),
                },
            ],
            MarkMetrics::default(),
        );
        assert_eq!(sheet.strokes(0).len(), 3);
        assert_eq!(sheet.hit_test(Point::new(25.0, 5.0)), Some(0));
        assert_eq!(sheet.hit_test(Point::new(45.0, 5.0)), Some(1));
        assert_eq!(sheet.caption(1).unwrap().to_string(), "second");
        assert_eq!(sheet.bounds(), Rect::new(0.0, 0.0, 60.0, 70.0));
    }

    #[test]
    fn precomputed_counts_are_clamped() {
        let sheet = PrecomputedSheet::new(
            vec![PrecomputedTally {
                x: 0.0,
                y: 0.0,
                count: 4_000_000_000,
                label: "huge".into(),
            }],
            MarkMetrics::default(),
        );
        assert_eq!(sheet.tallies()[0].count, MAX_PRECOMPUTED_STROKES);
        assert_eq!(sheet.stroke_count(0), 1000);
        assert_eq!(sheet.strokes(0).len(), 1000);
        assert_eq!(sheet.stroke_count(1), 0);
    }

    #[test]
    fn grid_stroke_count_matches_strokes() {
        let sheet = family_sheet(1280.0);
        for index in 0..sheet.len() {
            assert_eq!(sheet.stroke_count(index), sheet.strokes(index).len());
        }
        assert_eq!(sheet.stroke_count(sheet.len()), 0);
    }

    #[test]
    fn empty_sheet_draws_nothing() {
        let mut sheet = EmptySheet;
        assert!(sheet.is_empty());
        assert_eq!(sheet.hit_test(Point::new(1.0, 1.0)), None);
        assert!(!sheet.relayout(800.0));
        assert_eq!(sheet.advance_to(date(2000, 1, 1)), 0);
    }
}
