// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Write as _;

use kurbo::{Affine, BezPath, PathEl, Point};
use peniko::Color;

/// Formats a coordinate with at most three decimals and no trailing zeros.
pub(crate) fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        // Avoids `-0`.
        return format!("{}", rounded + 0.0);
    }
    let mut s = format!("{rounded:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// `matrix(a b c d e f)` for an SVG `transform` attribute.
pub(crate) fn matrix(xf: Affine) -> String {
    let [a, b, c, d, e, f] = xf.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        num(a),
        num(b),
        num(c),
        num(d),
        num(e),
        num(f)
    )
}

/// SVG path data for `path`.
pub(crate) fn path_data(path: &BezPath) -> String {
    fn pt(d: &mut String, p: Point) {
        let _ = write!(d, "{} {}", num(p.x), num(p.y));
    }

    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => {
                d.push('M');
                pt(&mut d, p);
            }
            PathEl::LineTo(p) => {
                d.push('L');
                pt(&mut d, p);
            }
            PathEl::QuadTo(p1, p2) => {
                d.push('Q');
                pt(&mut d, p1);
                d.push(' ');
                pt(&mut d, p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                d.push('C');
                pt(&mut d, p1);
                d.push(' ');
                pt(&mut d, p2);
                d.push(' ');
                pt(&mut d, p3);
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

/// `#rrggbb` plus an opacity in `0..=1`.
pub(crate) fn color(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    (
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
        f32::from(rgba.a) / 255.0,
    )
}

/// Escapes text for element content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
