// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end: configuration file, data file, replayed events, SVG.

use chrono::NaiveDate;
use kurbo::{Point, Vec2};
use tallywall::report::list_entries;
use tallywall::{Config, Event, Session, read_events};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn configured_wall_renders_and_answers_hover() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("people.json");
    std::fs::write(
        &data,
        r##"{"people": [
            {"name": "Ada", "dob": "2000-01-01", "color": "#112233"},
            {"name": "Bo", "dob": "2000-01-03", "death": "2000-01-05", "color": ["#445566"]}
        ]}"##,
    )
    .unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[data]
path = "{}"

[view]
width = 400.0
height = 300.0
scale = 1.0
offset_x = 0.0
offset_y = 0.0

[layout]
items_per_row = 3

[marks]
background = "white"
"#,
            data.display()
        ),
    )
    .unwrap();

    let config = Config::load_from(Some(config_path)).unwrap();
    let mut session = Session::from_config(&config, date(2000, 1, 6));
    assert_eq!(session.sheet().len(), 6);

    // Three per row: record 4 sits in the second row, second column.
    assert_eq!(session.sheet().origin(4), Some(Point::new(35.0, 100.0)));
    assert!(session.hover(Point::new(50.0, 120.0)));
    let caption = &session.tooltip().unwrap().caption;
    assert_eq!(caption.title, "Wed Jan 05 2000");
    assert_eq!(caption.body, "Ada");

    let entries = list_entries(session.sheet(), Some(4));
    let bodies: Vec<_> = entries.iter().map(|e| e.body.as_str()).collect();
    assert_eq!(bodies, ["Ada, Bo", "Ada, Bo", "Ada", "Ada"]);

    let svg = session.render(&config.renderer().unwrap());
    assert!(svg.contains(r##"fill="#ffffff""##));
    assert!(svg.contains(r##"stroke="#112233""##));
    assert!(svg.contains(r##"stroke="#445566""##));
    assert_eq!(svg.matches("<use ").count(), 8);
    assert!(svg.contains("Wed Jan 05 2000"));
}

#[test]
fn replayed_events_drive_the_camera() {
    let dir = tempfile::tempdir().unwrap();
    let events = dir.path().join("events.json");
    std::fs::write(
        &events,
        r#"[
            {"type": "pointer_down", "pos": {"x": 100, "y": 100}},
            {"type": "pointer_move", "pos": {"x": 130, "y": 90}},
            {"type": "pointer_up", "pos": {"x": 150, "y": 80}},
            {"type": "wheel", "pos": {"x": 0, "y": 0}, "delta": {"x": 0, "y": 1}, "zoom_modifier": true}
        ]"#,
    )
    .unwrap();

    let mut session = Session::from_config(&Config::default(), date(1938, 3, 1));
    for event in read_events(&events).unwrap() {
        session.handle(event);
    }
    assert!(!session.is_dragging());
    // Panned by (50, -20), then zoomed out about the origin.
    let camera = session.camera();
    assert!((camera.scale() - 0.8 / 1.1).abs() < 1e-12);
    let expected = Vec2::new(100.0, 30.0) / 1.1;
    assert!((camera.offset() - expected).hypot() < 1e-9);
}

#[test]
fn days_pass() {
    let mut session = Session::from_config(&Config::default(), date(2026, 10, 16));
    let before = session.sheet().len();
    assert!(!session.handle(Event::Tick {
        today: date(2026, 10, 16)
    }));
    assert!(session.handle(Event::Tick {
        today: date(2026, 10, 18)
    }));
    assert_eq!(session.sheet().len(), before + 2);
    let newest = list_entries(session.sheet(), Some(1));
    assert_eq!(newest[0].title, "Sun Oct 18 2026");
}
