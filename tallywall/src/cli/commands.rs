// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CLI command definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use tallywall_model::Granularity;

use crate::config::Config;

/// Options shared by every command that builds a wall.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Surface width in pixels
    #[arg(long)]
    pub width: Option<f64>,

    /// Surface height in pixels
    #[arg(long)]
    pub height: Option<f64>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// One mark per day or per year
    #[arg(short, long, value_enum)]
    pub granularity: Option<GranularityArg>,
}

impl ViewArgs {
    /// Applies the overrides to `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.view.width = width;
        }
        if let Some(height) = self.height {
            config.view.height = height;
        }
        if let Some(granularity) = self.granularity {
            config.data.granularity = granularity.into();
        }
    }
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Output file; stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Surface, date and granularity overrides.
    #[command(flatten)]
    pub view: ViewArgs,

    /// Replay a JSON array of session events before rendering
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Show the tooltip for this surface point
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub hover: Option<Vec<f64>>,

    /// Fit the whole wall into the surface
    #[arg(long)]
    pub fit: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Surface, date and granularity overrides.
    #[command(flatten)]
    pub view: ViewArgs,

    /// Maximum number of records, newest last
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Hover command arguments.
#[derive(Debug, Args)]
pub struct HoverCommand {
    /// Surface x
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Surface y
    #[arg(allow_negative_numbers = true)]
    pub y: f64,

    /// Surface, date and granularity overrides.
    #[command(flatten)]
    pub view: ViewArgs,
}

/// Watch command arguments.
#[derive(Debug, Args)]
pub struct WatchCommand {
    /// Output file, rewritten on every new day
    #[arg(short, long, value_name = "FILE", default_value = "tallywall.svg")]
    pub out: PathBuf,

    /// Surface, date and granularity overrides.
    #[command(flatten)]
    pub view: ViewArgs,

    /// Seconds between date checks
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

/// Granularity argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    /// One mark per day
    Day,
    /// One mark per year
    Year,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Day => Self::Day,
            GranularityArg::Year => Self::Year,
        }
    }
}
