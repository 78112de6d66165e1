// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration loading and validation.
//!
//! Configuration is layered with figment: built‑in defaults, then a TOML
//! file, then environment variables prefixed with `TALLYWALL_`. Nested keys
//! use a double underscore, e.g. `TALLYWALL_VIEW__MAX_SCALE=8`.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use kurbo::{Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use tallywall_model::{
    DEFAULT_CELL_WIDTH, DEFAULT_ROW_HEIGHT, DEFAULT_WRAP_MARGIN, Granularity, MarkMetrics,
    RowPolicy, SheetSettings, parse_css_color,
};
use tallywall_svg::{DEFAULT_CULL_MARGIN, DEFAULT_STROKE_WIDTH, MarkStyle, SvgRenderer};
use tallywall_view2d::{Camera, DEFAULT_ZOOM_STEP};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config directory.
const CONFIG_DIR_NAME: &str = "tallywall";

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "TALLYWALL_";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the people come from.
    pub data: DataConfig,
    /// Surface and camera.
    pub view: ViewConfig,
    /// Grid placement.
    pub layout: LayoutConfig,
    /// Mark appearance.
    pub marks: MarksConfig,
    /// The `watch` loop.
    pub watch: WatchConfig,
}

/// Data source configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON data file. The built‑in demo family is used when unset.
    pub path: Option<PathBuf>,
    /// One mark per `day` or per `year`.
    pub granularity: Granularity,
}

/// Surface and camera configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    /// Initial scale.
    pub scale: f64,
    /// Initial horizontal offset.
    pub offset_x: f64,
    /// Initial vertical offset.
    pub offset_y: f64,
    /// Smallest scale reachable by zooming.
    pub min_scale: f64,
    /// Largest scale reachable by zooming.
    pub max_scale: f64,
    /// Multiplier of one wheel notch.
    pub zoom_step: f64,
    /// World units drawn beyond the visible area.
    pub cull_margin: f64,
}

/// Grid layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between records.
    pub cell_width: f64,
    /// Vertical distance between rows.
    pub row_height: f64,
    /// Space kept free on the right when wrapping to the surface width.
    pub wrap_margin: f64,
    /// Fixed records per row; wraps to the surface width when unset.
    pub items_per_row: Option<usize>,
}

/// Mark appearance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarksConfig {
    /// Hit box width.
    pub width: f64,
    /// Hit box height.
    pub height: f64,
    /// Horizontal shift between the strokes of one record.
    pub advance: f64,
    /// Stroke line width.
    pub stroke_width: f64,
    /// CSS color behind the wall.
    pub background: String,
}

/// `watch` loop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Seconds between date checks.
    pub poll_interval_secs: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let camera = Camera::default();
        let (min_scale, max_scale) = camera.scale_limits();
        Self {
            width: 1280.0,
            height: 800.0,
            scale: camera.scale(),
            offset_x: camera.offset().x,
            offset_y: camera.offset().y,
            min_scale,
            max_scale,
            zoom_step: DEFAULT_ZOOM_STEP,
            cull_margin: DEFAULT_CULL_MARGIN,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            wrap_margin: DEFAULT_WRAP_MARGIN,
            items_per_row: None,
        }
    }
}

impl Default for MarksConfig {
    fn default() -> Self {
        let metrics = MarkMetrics::default();
        Self {
            width: metrics.width,
            height: metrics.height,
            advance: metrics.advance,
            stroke_width: DEFAULT_STROKE_WIDTH,
            background: "#fdfaf6".to_string(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{name} must be greater than 0 (got {value})"
        )))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        Self::from_figment(Self::figment(config_path))
    }

    /// The layered providers behind [`Config::load_from`].
    #[must_use]
    pub fn figment(config_path: Option<PathBuf>) -> Figment {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        require_positive("view.width", self.view.width)?;
        require_positive("view.height", self.view.height)?;
        require_positive("view.scale", self.view.scale)?;
        require_positive("view.min_scale", self.view.min_scale)?;
        require_positive("view.max_scale", self.view.max_scale)?;
        if self.view.min_scale > self.view.max_scale {
            return Err(Error::invalid_config(format!(
                "view.min_scale ({}) cannot be greater than view.max_scale ({})",
                self.view.min_scale, self.view.max_scale
            )));
        }
        if !(self.view.zoom_step.is_finite() && self.view.zoom_step > 1.0) {
            return Err(Error::invalid_config(format!(
                "view.zoom_step must be greater than 1 (got {})",
                self.view.zoom_step
            )));
        }
        if !(self.view.cull_margin.is_finite() && self.view.cull_margin >= 0.0) {
            return Err(Error::invalid_config("view.cull_margin cannot be negative"));
        }
        if !(self.view.offset_x.is_finite() && self.view.offset_y.is_finite()) {
            return Err(Error::invalid_config("view offset must be finite"));
        }

        require_positive("layout.cell_width", self.layout.cell_width)?;
        require_positive("layout.row_height", self.layout.row_height)?;
        if !self.layout.wrap_margin.is_finite() {
            return Err(Error::invalid_config("layout.wrap_margin must be finite"));
        }
        if self.layout.items_per_row == Some(0) {
            return Err(Error::invalid_config(
                "layout.items_per_row must be greater than 0",
            ));
        }

        require_positive("marks.width", self.marks.width)?;
        require_positive("marks.height", self.marks.height)?;
        require_positive("marks.stroke_width", self.marks.stroke_width)?;
        if !(self.marks.advance.is_finite() && self.marks.advance >= 0.0) {
            return Err(Error::invalid_config("marks.advance cannot be negative"));
        }
        if let Err(err) = self.background_color() {
            return Err(Error::invalid_config(err.to_string()));
        }

        if self.watch.poll_interval_secs == 0 {
            return Err(Error::invalid_config(
                "watch.poll_interval_secs must be greater than 0",
            ));
        }
        Ok(())
    }

    /// How records are assigned to rows.
    #[must_use]
    pub fn row_policy(&self) -> RowPolicy {
        match self.layout.items_per_row.and_then(NonZeroUsize::new) {
            Some(n) => RowPolicy::Fixed(n),
            None => RowPolicy::WrapToWidth {
                margin: self.layout.wrap_margin,
            },
        }
    }

    /// Mark size and stroke advance.
    #[must_use]
    pub fn mark_metrics(&self) -> MarkMetrics {
        MarkMetrics {
            width: self.marks.width,
            height: self.marks.height,
            advance: self.marks.advance,
        }
    }

    /// Everything needed to turn a data file into a sheet.
    #[must_use]
    pub fn sheet_settings(&self) -> SheetSettings {
        SheetSettings {
            granularity: self.data.granularity,
            policy: self.row_policy(),
            cell_width: self.layout.cell_width,
            row_height: self.layout.row_height,
            metrics: self.mark_metrics(),
        }
    }

    /// Surface size.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        Size::new(self.view.width, self.view.height)
    }

    /// The initial camera.
    ///
    /// The initial scale is clamped into the configured limits.
    #[must_use]
    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new(1.0, Vec2::new(self.view.offset_x, self.view.offset_y))
            .with_scale_limits(self.view.min_scale, self.view.max_scale);
        camera.set_scale(self.view.scale);
        camera
    }

    /// The parsed `marks.background` color.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a CSS color.
    pub fn background_color(&self) -> Result<Color> {
        Ok(parse_css_color("marks.background", &self.marks.background)?)
    }

    /// A renderer with the configured style.
    ///
    /// # Errors
    ///
    /// Returns an error if the background is not a color.
    pub fn renderer(&self) -> Result<SvgRenderer> {
        Ok(SvgRenderer::new()
            .with_background(self.background_color()?)
            .with_cull_margin(self.view.cull_margin)
            .with_mark_style(MarkStyle::default().with_stroke_width(self.marks.stroke_width)))
    }

    /// Interval between date checks in `watch`.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.watch.poll_interval_secs)
    }
}
