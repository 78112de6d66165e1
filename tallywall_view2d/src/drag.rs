// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-pan tracking: turn press/move/release into pan deltas.
//!
//! ## Usage
//!
//! 1) Call [`DragState::press`] on pointer down.
//! 2) On each pointer move, [`DragState::drag_to`] returns the delta since the
//!    previous position; feed it to [`crate::Camera::pan_by`].
//! 3) Call [`DragState::release`] on pointer up; it returns the total travel.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use tallywall_view2d::Camera;
//! use tallywall_view2d::drag::DragState;
//!
//! let mut camera = Camera::new(1.0, Vec2::ZERO);
//! let mut drag = DragState::default();
//!
//! drag.press(Point::new(10.0, 20.0));
//! if let Some(delta) = drag.drag_to(Point::new(15.0, 25.0)) {
//!     camera.pan_by(delta);
//! }
//! assert_eq!(camera.offset(), Vec2::new(5.0, 5.0));
//! assert_eq!(drag.release(), Some(Vec2::new(5.0, 5.0)));
//! ```

use kurbo::{Point, Vec2};

/// Pointer state between a press and the matching release.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    origin: Option<Point>,
    last: Option<Point>,
}

impl DragState {
    /// Starts a drag at `pos`, replacing any drag in progress.
    pub fn press(&mut self, pos: Point) {
        self.origin = Some(pos);
        self.last = Some(pos);
    }

    /// Moves the pointer to `pos` and returns the delta since the previous
    /// position, or `None` when no drag is active.
    pub fn drag_to(&mut self, pos: Point) -> Option<Vec2> {
        self.origin?;
        let previous = self.last.replace(pos)?;
        Some(pos - previous)
    }

    /// Ends the drag and returns the total travel from the press position.
    pub fn release(&mut self) -> Option<Vec2> {
        let origin = self.origin.take();
        let last = self.last.take();
        Some(last? - origin?)
    }

    /// Returns `true` between a press and its release.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    /// Total travel from the press position to `pos`.
    #[must_use]
    pub fn travel_to(&self, pos: Point) -> Option<Vec2> {
        self.origin.map(|origin| pos - origin)
    }
}
