// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::modes::FitMode;

/// Multiplier for one wheel notch when zooming.
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;

const DEFAULT_SCALE: f64 = 0.8;
const DEFAULT_OFFSET: Vec2 = Vec2::new(50.0, 50.0);
const DEFAULT_MIN_SCALE: f64 = 0.05;
const DEFAULT_MAX_SCALE: f64 = 4.0;

/// Returns the zoom multiplier for a wheel event with vertical delta `dy`.
///
/// Scrolling away from the user (`dy < 0`) zooms in by `step`, scrolling
/// towards the user zooms out by `1 / step`. A zero or non‑finite delta
/// yields `1.0`, which [`Camera::zoom_about`] treats as a no‑op.
#[must_use]
pub fn wheel_zoom_factor(dy: f64, step: f64) -> f64 {
    if !dy.is_finite() || !step.is_finite() || step <= 0.0 {
        return 1.0;
    }
    if dy < 0.0 {
        step
    } else if dy > 0.0 {
        1.0 / step
    } else {
        1.0
    }
}

/// Pan + zoom state mapping world coordinates onto a device surface.
///
/// A world point `w` is shown at `offset + w * scale`. The scale is uniform
/// and always kept inside `[min_scale, max_scale]`.
///
/// All mutating operations return `true` when the camera actually changed,
/// so callers can skip redundant redraws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    scale: f64,
    offset: Vec2,
    min_scale: f64,
    max_scale: f64,
    fit_mode: FitMode,
}

impl Default for Camera {
    /// Scale `0.8`, offset `(50, 50)`, scale limits `[0.05, 4.0]`.
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: DEFAULT_OFFSET,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            fit_mode: FitMode::default(),
        }
    }
}

impl Camera {
    /// Creates a camera with the given scale and offset and the default limits.
    ///
    /// The scale is clamped into the default limits.
    #[must_use]
    pub fn new(scale: f64, offset: Vec2) -> Self {
        let mut camera = Self {
            offset,
            ..Self::default()
        };
        camera.set_scale(scale);
        camera
    }

    /// Returns a copy of this camera with different scale limits.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.set_scale_limits(min_scale, max_scale);
        self
    }

    /// Returns the current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the current offset in surface coordinates.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns the `(min, max)` scale limits.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Sets the scale limits.
    ///
    /// The pair is normalized so that `min <= max`, and the minimum is kept
    /// strictly positive. The current scale is clamped into the new range
    /// without moving the offset.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (lo, hi) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = lo.max(f64::MIN_POSITIVE);
        self.max_scale = hi.max(self.min_scale);
        self.scale = self.scale.clamp(self.min_scale, self.max_scale);
    }

    /// Sets the scale, clamped into the limits. The offset is unchanged.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() {
            return false;
        }
        let clamped = scale.clamp(self.min_scale, self.max_scale);
        if clamped == self.scale {
            return false;
        }
        self.scale = clamped;
        true
    }

    /// Sets the offset in surface coordinates.
    pub fn set_offset(&mut self, offset: Vec2) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        true
    }

    /// Sets how [`Camera::fit_rect`] positions fitted content.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.fit_mode = mode;
    }

    /// Returns the current fit mode.
    #[must_use]
    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Moves the content by `delta` surface units.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return false;
        }
        self.offset += delta;
        true
    }

    /// Multiplies the scale by `factor`, keeping `anchor` (in surface
    /// coordinates) over the same world point.
    ///
    /// The new scale is clamped into the limits first, and the offset is
    /// derived from the clamped scale:
    ///
    /// ```text
    /// s1 = clamp(s0 * factor, min, max)
    /// o1 = anchor - (anchor - o0) / s0 * s1
    /// ```
    ///
    /// so the anchored point does not drift when a limit is hit. Factors that
    /// are non‑positive or non‑finite are ignored.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let old_scale = self.scale;
        let new_scale = (old_scale * factor).clamp(self.min_scale, self.max_scale);
        if new_scale == old_scale {
            return false;
        }
        let anchor = anchor.to_vec2();
        self.offset = anchor - (anchor - self.offset) / old_scale * new_scale;
        self.scale = new_scale;
        true
    }

    /// Applies a wheel event at `pointer`.
    ///
    /// With the zoom modifier held, zooms about the pointer by
    /// [`wheel_zoom_factor`]; otherwise pans by `-delta`.
    pub fn apply_wheel(
        &mut self,
        pointer: Point,
        delta: Vec2,
        zoom_modifier: bool,
        zoom_step: f64,
    ) -> bool {
        if zoom_modifier {
            self.zoom_about(pointer, wheel_zoom_factor(delta.y, zoom_step))
        } else {
            self.pan_by(-delta)
        }
    }

    /// Fits `rect` (world coordinates) inside a surface of `view_size`,
    /// preserving aspect ratio. The scale is clamped into the limits.
    ///
    /// Empty rectangles and empty surfaces are ignored.
    pub fn fit_rect(&mut self, rect: Rect, view_size: Size) -> bool {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return false;
        }
        if view_size.width <= 0.0 || view_size.height <= 0.0 {
            return false;
        }
        let sx = view_size.width / rect.width();
        let sy = view_size.height / rect.height();
        let scale = sx.min(sy).clamp(self.min_scale, self.max_scale);

        let offset = match self.fit_mode {
            FitMode::Center => {
                let view_center = Vec2::new(view_size.width * 0.5, view_size.height * 0.5);
                view_center - rect.center().to_vec2() * scale
            }
            FitMode::AlignMin => -rect.origin().to_vec2() * scale,
        };
        let changed = scale != self.scale || offset != self.offset;
        self.scale = scale;
        self.offset = offset;
        changed
    }

    /// World → surface transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Converts a world point into surface coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        (pt.to_vec2() * self.scale + self.offset).to_point()
    }

    /// Converts a surface point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        ((pt.to_vec2() - self.offset) / self.scale).to_point()
    }

    /// Converts a world rectangle into surface coordinates.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        // Uniform positive scale: the corners keep their order.
        Rect::from_points(
            self.world_to_view_point(rect.origin()),
            self.world_to_view_point(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Converts a surface rectangle into world coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.view_to_world_point(rect.origin()),
            self.view_to_world_point(Point::new(rect.x1, rect.y1)),
        )
    }

    /// World rectangle visible on a surface of `view_size`.
    #[must_use]
    pub fn visible_world_rect(&self, view_size: Size) -> Rect {
        self.view_to_world_rect(view_size.to_rect())
    }

    /// Snapshot of the camera for logging and inspection.
    #[must_use]
    pub fn debug_info(&self, view_size: Size) -> CameraDebugInfo {
        CameraDebugInfo {
            scale: self.scale,
            offset: self.offset,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            visible_world_rect: self.visible_world_rect(view_size),
        }
    }
}

/// Debug snapshot of a [`Camera`].
#[derive(Clone, Copy, Debug)]
pub struct CameraDebugInfo {
    /// Current uniform scale.
    pub scale: f64,
    /// Current offset in surface coordinates.
    pub offset: Vec2,
    /// Minimum scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
    /// World rectangle currently visible.
    pub visible_world_rect: Rect,
}
