// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-text and JSON listings of tally records.

use std::fmt::Write as _;

use serde::Serialize;
use tallywall_model::Sheet;

/// One record as printed by `tallywall list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    /// Sequential index.
    pub index: usize,
    /// World x of the mark.
    pub x: f64,
    /// World y of the mark.
    pub y: f64,
    /// Number of strokes.
    pub strokes: usize,
    /// Caption title: the date, or a precomputed label.
    pub title: String,
    /// Caption body: who was alive.
    pub body: String,
}

/// The last `limit` records of `sheet` (all of them when `None`).
#[must_use]
pub fn list_entries(sheet: &dyn Sheet, limit: Option<usize>) -> Vec<ListEntry> {
    let len = sheet.len();
    let start = limit.map_or(0, |limit| len.saturating_sub(limit));
    (start..len)
        .filter_map(|index| {
            let origin = sheet.origin(index)?;
            let caption = sheet.caption(index)?;
            Some(ListEntry {
                index,
                x: origin.x,
                y: origin.y,
                strokes: sheet.stroke_count(index),
                title: caption.title,
                body: caption.body,
            })
        })
        .collect()
}

/// One line per entry: index, title, stroke count and body.
#[must_use]
pub fn format_list(entries: &[ListEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = write!(out, "{:>6}  {}  [{}]", entry.index, entry.title, entry.strokes);
        if !entry.body.is_empty() {
            let _ = write!(out, "  {}", entry.body);
        }
        out.push('\n');
    }
    out
}
