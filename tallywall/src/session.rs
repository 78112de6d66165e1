// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An interactive viewing session over one sheet.
//!
//! [`Session`] owns everything a viewer mutates: the sheet, the camera,
//! the drag state, the surface size and the tooltip. Input arrives as
//! [`Event`]s; [`Session::handle`] applies one and reports whether the
//! picture changed.

use std::path::Path;

use chrono::NaiveDate;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use tallywall_model::{DataFile, EmptySheet, Sheet, SheetSettings};
use tallywall_svg::{SvgRenderer, Tooltip};
use tallywall_view2d::drag::DragState;
use tallywall_view2d::{Camera, DEFAULT_ZOOM_STEP};

use crate::config::Config;
use crate::error::{Error, Result};

/// Input to a [`Session`].
///
/// Positions are in surface coordinates. Serialized as JSON objects tagged
/// with `type`, e.g. `{"type": "pointer_move", "pos": {"x": 10, "y": 20}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Mouse wheel or trackpad scroll.
    Wheel {
        /// Pointer position.
        pos: Point,
        /// Scroll amount; `y < 0` scrolls away from the user.
        delta: Vec2,
        /// Ctrl or Cmd held: zoom instead of pan.
        #[serde(default)]
        zoom_modifier: bool,
    },
    /// Primary button pressed.
    PointerDown {
        /// Pointer position.
        pos: Point,
    },
    /// Pointer moved.
    PointerMove {
        /// Pointer position.
        pos: Point,
    },
    /// Primary button released.
    PointerUp {
        /// Pointer position.
        pos: Point,
    },
    /// The surface changed size.
    Resize {
        /// New surface size.
        size: Size,
    },
    /// The calendar date may have changed.
    Tick {
        /// Today's date.
        today: NaiveDate,
    },
}

/// Loads the sheet described by `path`, or the demo family when `path` is
/// `None`.
///
/// Failures are logged and leave an empty sheet; there is no retry.
#[must_use]
pub fn load_or_empty(
    path: Option<&Path>,
    settings: &SheetSettings,
    today: NaiveDate,
    surface_width: f64,
) -> Box<dyn Sheet> {
    let data = match path {
        Some(path) => DataFile::load(path),
        None => DataFile::demo(),
    };
    match data {
        Ok(data) => {
            let sheet = data.into_sheet(settings, today, surface_width);
            tracing::info!(records = sheet.len(), %today, "tally wall ready");
            sheet
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load tally data");
            Box::new(EmptySheet)
        }
    }
}

/// Reads a JSON array of [`Event`]s from `path`.
///
/// # Errors
///
/// Returns [`Error::EventsRead`] if the file cannot be read and
/// [`Error::Json`] if it is not a list of events.
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::EventsRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// A sheet under a camera, driven by input events.
#[derive(Debug)]
pub struct Session {
    sheet: Box<dyn Sheet>,
    camera: Camera,
    drag: DragState,
    surface: Size,
    tooltip: Option<Tooltip>,
    zoom_step: f64,
}

impl Session {
    /// A session showing `sheet` through `camera` on a `surface` sized surface.
    #[must_use]
    pub fn new(sheet: Box<dyn Sheet>, camera: Camera, surface: Size) -> Self {
        Self {
            sheet,
            camera,
            drag: DragState::default(),
            surface,
            tooltip: None,
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }

    /// A session for `config` as of `today`.
    ///
    /// Data errors are logged and leave the wall empty.
    #[must_use]
    pub fn from_config(config: &Config, today: NaiveDate) -> Self {
        let surface = config.surface_size();
        let sheet = load_or_empty(
            config.data.path.as_deref(),
            &config.sheet_settings(),
            today,
            surface.width,
        );
        Self::new(sheet, config.camera(), surface).with_zoom_step(config.view.zoom_step)
    }

    /// Replaces the wheel zoom multiplier.
    #[must_use]
    pub fn with_zoom_step(mut self, zoom_step: f64) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    /// Applies one event. Returns `true` when a redraw is needed.
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Wheel {
                pos,
                delta,
                zoom_modifier,
            } => {
                let moved = self
                    .camera
                    .apply_wheel(pos, delta, zoom_modifier, self.zoom_step);
                if moved {
                    tracing::trace!(
                        scale = self.camera.scale(),
                        offset = ?self.camera.offset(),
                        "camera moved"
                    );
                    self.refresh_tooltip();
                }
                moved
            }
            Event::PointerDown { pos } => {
                self.drag.press(pos);
                self.tooltip.take().is_some()
            }
            Event::PointerMove { pos } => {
                if self.drag.is_dragging() {
                    self.drag
                        .drag_to(pos)
                        .is_some_and(|delta| self.camera.pan_by(delta))
                } else {
                    self.hover(pos)
                }
            }
            Event::PointerUp { pos } => {
                let panned = self
                    .drag
                    .drag_to(pos)
                    .is_some_and(|delta| self.camera.pan_by(delta));
                if let Some(travel) = self.drag.release() {
                    tracing::trace!(?travel, "drag ended");
                }
                panned
            }
            Event::Resize { size } => self.resize(size),
            Event::Tick { today } => {
                let added = self.sheet.advance_to(today);
                if added > 0 {
                    tracing::debug!(added, total = self.sheet.len(), "new day");
                }
                added > 0
            }
        }
    }

    /// Shows the caption of the record under `pos`, or hides the tooltip
    /// on a miss. Returns `true` when the tooltip changed.
    pub fn hover(&mut self, pos: Point) -> bool {
        let world = self.camera.view_to_world_point(pos);
        let next = self
            .sheet
            .hit_test(world)
            .and_then(|index| self.sheet.caption(index))
            .map(|caption| Tooltip::new(pos, caption));
        if next == self.tooltip {
            return false;
        }
        self.tooltip = next;
        true
    }

    fn refresh_tooltip(&mut self) {
        if let Some(pointer) = self.tooltip.as_ref().map(|t| t.pointer) {
            self.hover(pointer);
        }
    }

    fn resize(&mut self, size: Size) -> bool {
        if !(size.width > 0.0 && size.height > 0.0) || size == self.surface {
            return false;
        }
        self.surface = size;
        self.sheet.relayout(size.width);
        self.refresh_tooltip();
        true
    }

    /// Fits the whole wall into the surface.
    pub fn fit_all(&mut self) -> bool {
        let fitted = self.camera.fit_rect(self.sheet.bounds(), self.surface);
        if fitted {
            tracing::debug!(camera = ?self.camera.debug_info(self.surface), "fitted wall");
        }
        fitted
    }

    /// Renders the current state.
    #[must_use]
    pub fn render(&self, renderer: &SvgRenderer) -> String {
        renderer.render(
            self.sheet.as_ref(),
            &self.camera,
            self.surface,
            self.tooltip.as_ref(),
        )
    }

    /// The sheet being shown.
    #[must_use]
    pub fn sheet(&self) -> &dyn Sheet {
        self.sheet.as_ref()
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Surface size.
    #[must_use]
    pub fn surface(&self) -> Size {
        self.surface
    }

    /// The visible tooltip, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Returns `true` between pointer down and pointer up.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(today: NaiveDate) -> Session {
        let sheet = DataFile::from_json(
            r#"{"people": [{"name": "Ada", "dob": "2000-01-01", "color": "navy"}]}"#,
        )
        .unwrap()
        .into_sheet(&SheetSettings::default(), today, 1280.0);
        Session::new(sheet, Camera::default(), Size::new(1280.0, 800.0))
    }

    #[test]
    fn hover_shows_and_hides_tooltip() {
        let mut s = session(date(2000, 1, 3));
        // Record 0 occupies world (0..40, 0..70), i.e. view (50..82, 50..106).
        assert!(s.handle(Event::PointerMove {
            pos: Point::new(60.0, 60.0)
        }));
        let tooltip = s.tooltip().unwrap();
        assert_eq!(tooltip.caption.title, "Sat Jan 01 2000");
        assert_eq!(tooltip.caption.body, "Ada");

        // Moving within the same record only moves the tooltip.
        assert!(s.handle(Event::PointerMove {
            pos: Point::new(61.0, 60.0)
        }));
        // A miss hides it, a second miss changes nothing.
        assert!(s.handle(Event::PointerMove {
            pos: Point::new(10.0, 10.0)
        }));
        assert!(s.tooltip().is_none());
        assert!(!s.handle(Event::PointerMove {
            pos: Point::new(11.0, 10.0)
        }));
    }

    #[test]
    fn wheel_zooms_about_pointer_or_pans() {
        let mut s = session(date(2000, 1, 3));
        let pos = Point::new(300.0, 200.0);
        let before = s.camera().view_to_world_point(pos);
        assert!(s.handle(Event::Wheel {
            pos,
            delta: Vec2::new(0.0, -120.0),
            zoom_modifier: true,
        }));
        assert!((s.camera().scale() - 0.88).abs() < 1e-12);
        let after = s.camera().view_to_world_point(pos);
        assert!((before - after).hypot() < 1e-9);

        assert!(s.handle(Event::Wheel {
            pos,
            delta: Vec2::new(5.0, 40.0),
            zoom_modifier: false,
        }));
        assert!((s.camera().offset().y - (after.y * -0.88 + 200.0 - 40.0)).abs() < 1e-9);

        // No vertical motion with the modifier held: nothing to do.
        assert!(!s.handle(Event::Wheel {
            pos,
            delta: Vec2::new(3.0, 0.0),
            zoom_modifier: true,
        }));
    }

    #[test]
    fn drag_pans_and_hides_tooltip() {
        let mut s = session(date(2000, 1, 3));
        s.handle(Event::PointerMove {
            pos: Point::new(60.0, 60.0),
        });
        assert!(s.tooltip().is_some());

        assert!(s.handle(Event::PointerDown {
            pos: Point::new(60.0, 60.0)
        }));
        assert!(s.tooltip().is_none());
        assert!(s.is_dragging());
        assert!(s.handle(Event::PointerMove {
            pos: Point::new(80.0, 50.0)
        }));
        assert!(s.handle(Event::PointerUp {
            pos: Point::new(90.0, 50.0)
        }));
        assert!(!s.is_dragging());
        assert_eq!(s.camera().offset(), Vec2::new(80.0, 40.0));
    }

    #[test]
    fn resize_relays_out_and_tick_appends() {
        let mut s = session(date(2000, 2, 10));
        assert!(!s.handle(Event::Resize {
            size: Size::new(1280.0, 800.0)
        }));
        assert!(s.handle(Event::Resize {
            size: Size::new(205.0, 800.0)
        }));
        assert_eq!(s.sheet().origin(4), Some(Point::new(0.0, 100.0)));
        assert!(!s.handle(Event::Resize {
            size: Size::new(0.0, 800.0)
        }));

        let before = s.sheet().len();
        assert!(!s.handle(Event::Tick {
            today: date(2000, 2, 10)
        }));
        assert!(s.handle(Event::Tick {
            today: date(2000, 2, 12)
        }));
        assert_eq!(s.sheet().len(), before + 2);
    }

    #[test]
    fn missing_data_leaves_an_empty_wall() {
        init_test_logging();
        let sheet = load_or_empty(
            Some(Path::new("/no/such/people.json")),
            &SheetSettings::default(),
            date(2020, 1, 1),
            1280.0,
        );
        assert!(sheet.is_empty());
        let mut s = Session::new(sheet, Camera::default(), Size::new(800.0, 600.0));
        assert!(!s.handle(Event::PointerMove {
            pos: Point::new(60.0, 60.0)
        }));
        assert!(!s.fit_all());
    }

    #[test]
    fn events_deserialize_from_json() {
        let events: Vec<Event> = serde_json::from_str(
            r#"[
                {"type": "wheel", "pos": {"x": 1, "y": 2}, "delta": {"x": 0, "y": -1}, "zoom_modifier": true},
                {"type": "pointer_move", "pos": {"x": 3, "y": 4}},
                {"type": "resize", "size": {"width": 640, "height": 480}},
                {"type": "tick", "today": "2030-01-01"}
            ]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[2],
            Event::Resize {
                size: Size::new(640.0, 480.0)
            }
        );
        assert!(matches!(events[0], Event::Wheel { zoom_modifier: true, .. }));
    }

    #[test]
    fn read_events_reports_path_and_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, r#"[{"type": "pointer_down", "pos": {"x": 1, "y": 1}}]"#).unwrap();
        assert_eq!(
            read_events(&path).unwrap(),
            vec![Event::PointerDown {
                pos: Point::new(1.0, 1.0)
            }]
        );

        std::fs::write(&path, r#"[{"type": "teleport"}]"#).unwrap();
        assert!(matches!(read_events(&path), Err(Error::Json(_))));

        let missing = dir.path().join("missing.json");
        let err = read_events(&missing).unwrap_err();
        assert!(matches!(err, Error::EventsRead { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
