// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tally Wall View 2D: the camera and drag state behind a pannable, zoomable wall.
//!
//! This crate provides small, headless value types for viewing a world‑space
//! plane on a device surface:
//! - [`Camera`]: a uniform scale plus a 2D offset, with cursor‑anchored zoom
//!   that keeps the world point under the pointer fixed (also at the zoom
//!   limits), panning, and world/view coordinate conversion.
//! - [`drag::DragState`]: press/move/release tracking that turns pointer
//!   motion into pan deltas.
//! - [`wheel_zoom_factor`]: the multiplier applied for one wheel notch.
//!
//! It does **not** own any scene or rendering backend. Callers keep their
//! own content, route input events into camera operations, and use
//! [`Camera::transform`] or [`Camera::visible_world_rect`] when drawing.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use tallywall_view2d::Camera;
//!
//! let mut camera = Camera::default();
//! let pointer = Point::new(400.0, 300.0);
//! let before = camera.view_to_world_point(pointer);
//!
//! // One wheel notch towards the user with the zoom modifier held.
//! camera.zoom_about(pointer, 1.1);
//!
//! let after = camera.view_to_world_point(pointer);
//! assert!((before - after).hypot() < 1e-9);
//!
//! // World rectangle to draw for an 800x600 surface.
//! let visible = camera.visible_world_rect(Size::new(800.0, 600.0));
//! assert!(visible.width() > 0.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod camera;
pub mod drag;
mod modes;

pub use camera::{Camera, CameraDebugInfo, DEFAULT_ZOOM_STEP, wheel_zoom_factor};
pub use modes::FitMode;
