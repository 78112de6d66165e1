// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Write as _;
use std::collections::BTreeMap;

use kurbo::{Rect, Size};
use peniko::Color;
use tallywall_model::Sheet;
use tallywall_view2d::Camera;

use crate::format;
use crate::mark::MarkStyle;
use crate::tooltip::Tooltip;

/// Paper color behind the wall.
pub const DEFAULT_BACKGROUND: Color = Color::from_rgb8(0xfd, 0xfa, 0xf6);

/// Extra world units drawn beyond the visible area.
pub const DEFAULT_CULL_MARGIN: f64 = 150.0;

/// Draws a [`Sheet`] through a [`Camera`] into an SVG document.
///
/// Each distinct stroke color becomes one prebuilt `<path>` in `<defs>`.
/// Records reference them with `<use>`, so a wall of thousands of records
/// stays small. Records outside the visible area (plus the cull margin)
/// are skipped.
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    style: MarkStyle,
    background: Color,
    cull_margin: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            style: MarkStyle::default(),
            background: DEFAULT_BACKGROUND,
            cull_margin: DEFAULT_CULL_MARGIN,
        }
    }
}

/// Summary of one render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Records emitted.
    pub records: usize,
    /// Strokes emitted over all records.
    pub strokes: usize,
    /// Distinct stroke colors.
    pub inks: usize,
}

impl SvgRenderer {
    /// A renderer with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stroke style.
    #[must_use]
    pub fn with_mark_style(mut self, style: MarkStyle) -> Self {
        self.style = style;
        self
    }

    /// Replaces the background color.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Replaces the cull margin. Negative values count as zero.
    #[must_use]
    pub fn with_cull_margin(mut self, cull_margin: f64) -> Self {
        self.cull_margin = cull_margin.max(0.0);
        self
    }

    /// The stroke style.
    #[must_use]
    pub fn mark_style(&self) -> &MarkStyle {
        &self.style
    }

    /// World rectangle outside of which nothing is drawn.
    #[must_use]
    pub fn cull_rect(&self, camera: &Camera, surface: Size) -> Rect {
        camera
            .visible_world_rect(surface)
            .inflate(self.cull_margin, self.cull_margin)
    }

    /// Records drawn for `surface`, in ascending order.
    #[must_use]
    pub fn visible_records(&self, sheet: &dyn Sheet, camera: &Camera, surface: Size) -> Vec<usize> {
        let cull = self.cull_rect(camera, surface);
        let metrics = sheet.metrics();
        sheet
            .candidates(cull)
            .into_iter()
            .filter(|&i| {
                let Some(origin) = sheet.origin(i) else {
                    return false;
                };
                let extent = metrics.hit_box(origin);
                extent.x1 >= cull.x0
                    && extent.x0 <= cull.x1
                    && extent.y1 >= cull.y0
                    && extent.y0 <= cull.y1
            })
            .collect()
    }

    /// Renders the sheet, and the tooltip if any, into an SVG document.
    #[must_use]
    pub fn render(
        &self,
        sheet: &dyn Sheet,
        camera: &Camera,
        surface: Size,
        tooltip: Option<&Tooltip>,
    ) -> String {
        self.render_with_stats(sheet, camera, surface, tooltip).0
    }

    /// Like [`SvgRenderer::render`], also reporting what was drawn.
    #[must_use]
    pub fn render_with_stats(
        &self,
        sheet: &dyn Sheet,
        camera: &Camera,
        surface: Size,
        tooltip: Option<&Tooltip>,
    ) -> (String, RenderStats) {
        let advance = sheet.metrics().advance;
        let mut inks: BTreeMap<[u8; 4], usize> = BTreeMap::new();
        let mut defs = String::new();
        let mut body = String::new();
        let mut stats = RenderStats::default();

        for index in self.visible_records(sheet, camera, surface) {
            let Some(origin) = sheet.origin(index) else {
                continue;
            };
            stats.records += 1;
            let mut x = origin.x;
            for color in sheet.strokes(index) {
                let next = inks.len();
                let rgba = color.to_rgba8();
                let key = [rgba.r, rgba.g, rgba.b, rgba.a];
                let ink = *inks.entry(key).or_insert_with(|| {
                    self.write_ink(&mut defs, next, color);
                    next
                });
                let _ = write!(
                    body,
                    "<use href=\"#ink{ink}\" x=\"{}\" y=\"{}\"/>",
                    format::num(x),
                    format::num(origin.y)
                );
                stats.strokes += 1;
                x += advance;
            }
        }
        stats.inks = inks.len();

        let (bg, bg_alpha) = format::color(self.background);
        let width = format::num(surface.width);
        let height = format::num(surface.height);

        let mut svg = String::with_capacity(defs.len() + body.len() + 512);
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        if !defs.is_empty() {
            svg.push_str("<defs>");
            svg.push_str(&defs);
            svg.push_str("</defs>");
        }
        let _ = write!(svg, "<rect width=\"{width}\" height=\"{height}\" fill=\"{bg}\"");
        if bg_alpha < 1.0 {
            let _ = write!(svg, " fill-opacity=\"{bg_alpha}\"");
        }
        svg.push_str("/>");
        let _ = write!(
            svg,
            "<g class=\"wall\" transform=\"{}\">",
            format::matrix(camera.transform())
        );
        svg.push_str(&body);
        svg.push_str("</g>");
        if let Some(tooltip) = tooltip {
            tooltip.write_svg(&mut svg);
        }
        svg.push_str("</svg>\n");

        tracing::trace!(
            records = stats.records,
            strokes = stats.strokes,
            inks = stats.inks,
            "rendered svg"
        );
        (svg, stats)
    }

    fn write_ink(&self, defs: &mut String, id: usize, color: Color) {
        let (hex, alpha) = format::color(color);
        let _ = write!(
            defs,
            "<path id=\"ink{id}\" d=\"{}\" fill=\"none\" stroke=\"{hex}\" stroke-width=\"{}\" stroke-linecap=\"{}\"",
            format::path_data(&self.style.path),
            format::num(self.style.stroke_width),
            self.style.cap_name()
        );
        if alpha < 1.0 {
            let _ = write!(defs, " stroke-opacity=\"{alpha}\"");
        }
        defs.push_str("/>");
    }
}
