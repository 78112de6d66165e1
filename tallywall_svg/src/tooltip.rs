// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Write as _;

use kurbo::{Point, Vec2};
use tallywall_model::Caption;

use crate::format::{escape, num};

/// Distance between the pointer and the tooltip's top‑left corner.
pub const TOOLTIP_OFFSET: Vec2 = Vec2::new(15.0, 15.0);

const FONT_SIZE: f64 = 13.0;
const LINE_HEIGHT: f64 = 18.0;
const PADDING: f64 = 8.0;
// Rough advance of one character at `FONT_SIZE`.
const CHAR_WIDTH: f64 = 7.0;

/// A caption shown next to the pointer, in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Pointer position the tooltip follows.
    pub pointer: Point,
    /// What it says.
    pub caption: Caption,
}

impl Tooltip {
    /// A tooltip for `caption` at `pointer`.
    #[must_use]
    pub fn new(pointer: Point, caption: Caption) -> Self {
        Self { pointer, caption }
    }

    /// Top‑left corner of the box.
    #[must_use]
    pub fn position(&self) -> Point {
        self.pointer + TOOLTIP_OFFSET
    }

    pub(crate) fn write_svg(&self, out: &mut String) {
        let pos = self.position();
        let longest = self
            .caption
            .title
            .chars()
            .count()
            .max(self.caption.body.chars().count());
        let lines = if self.caption.body.is_empty() { 1.0 } else { 2.0 };
        let width = to_f64(longest) * CHAR_WIDTH + 2.0 * PADDING;
        let height = lines * LINE_HEIGHT + PADDING;

        let _ = write!(
            out,
            "<g class=\"tooltip\" transform=\"translate({} {})\">",
            num(pos.x),
            num(pos.y)
        );
        let _ = write!(
            out,
            "<rect width=\"{}\" height=\"{}\" rx=\"4\" fill=\"#ffffff\" fill-opacity=\"0.95\" stroke=\"#333333\" stroke-width=\"1\"/>",
            num(width),
            num(height)
        );
        let _ = write!(
            out,
            "<text x=\"{PADDING}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{FONT_SIZE}\" fill=\"#333333\">",
            num(LINE_HEIGHT)
        );
        let _ = write!(
            out,
            "<tspan font-weight=\"bold\">{}</tspan>",
            escape(&self.caption.title)
        );
        if !self.caption.body.is_empty() {
            let _ = write!(
                out,
                "<tspan x=\"{PADDING}\" dy=\"{LINE_HEIGHT}\">{}</tspan>",
                escape(&self.caption.body)
            );
        }
        out.push_str("</text></g>");
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "caption lengths are tiny"
)]
fn to_f64(v: usize) -> f64 {
    v as f64
}
