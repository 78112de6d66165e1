// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line interface for the `tallywall` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, GranularityArg, HoverCommand, ListCommand, RenderCommand, ViewArgs,
    WatchCommand,
};

use crate::logging::Verbosity;

/// tallywall - one mark for every day lived
///
/// Renders a wall of tally marks, one per day (or year) since the earliest
/// birth in a family, each listing who was alive on that date.
#[derive(Debug, Parser)]
#[command(name = "tallywall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON data file with people or precomputed tallies
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the wall as SVG
    Render(RenderCommand),

    /// List tally records
    List(ListCommand),

    /// Show the tooltip for a surface point
    Hover(HoverCommand),

    /// Re-render whenever the date changes
    Watch(WatchCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }

    /// Returns `false` for commands that must work while the configuration
    /// itself is broken.
    #[must_use]
    pub fn needs_config(&self) -> bool {
        !matches!(
            self.command,
            Command::Config(ConfigCommand::Path | ConfigCommand::Validate { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "tallywall");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["tallywall", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["tallywall", "-v", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["tallywall", "-vv", "list"]).verbosity(), Verbosity::Trace);
        assert_eq!(parse(&["tallywall", "list", "-q"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_render() {
        let cli = parse(&[
            "tallywall",
            "--data",
            "family.json",
            "render",
            "-o",
            "wall.svg",
            "--today",
            "2024-02-29",
            "--granularity",
            "year",
            "--hover",
            "120",
            "-40.5",
        ]);
        assert_eq!(cli.data, Some(PathBuf::from("family.json")));
        let Command::Render(render) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(render.out, Some(PathBuf::from("wall.svg")));
        assert_eq!(render.view.today.map(|d| d.to_string()).as_deref(), Some("2024-02-29"));
        assert_eq!(render.view.granularity, Some(GranularityArg::Year));
        assert_eq!(render.hover, Some(vec![120.0, -40.5]));
        assert!(!render.fit);
    }

    #[test]
    fn test_parse_list_and_hover() {
        let cli = parse(&["tallywall", "list", "--limit", "3", "--json"]);
        assert!(matches!(
            cli.command,
            Command::List(ListCommand {
                limit: Some(3),
                json: true,
                ..
            })
        ));

        let cli = parse(&["tallywall", "hover", "60", "70"]);
        let Command::Hover(hover) = cli.command else {
            panic!("expected hover");
        };
        assert!((hover.x - 60.0).abs() < f64::EPSILON);
        assert!((hover.y - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_watch_defaults() {
        let cli = parse(&["tallywall", "watch"]);
        let Command::Watch(watch) = cli.command else {
            panic!("expected watch");
        };
        assert_eq!(watch.out, PathBuf::from("tallywall.svg"));
        assert_eq!(watch.interval, None);
    }

    #[test]
    fn test_parse_config_commands() {
        let cli = parse(&["tallywall", "config", "show", "--json"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
        let cli = parse(&["tallywall", "config", "validate", "wall.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(ref f) }) if f == &PathBuf::from("wall.toml")
        ));
        let cli = parse(&["tallywall", "-c", "/custom/config.toml", "config", "path"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_config_inspection_skips_loading() {
        assert!(!parse(&["tallywall", "config", "path"]).needs_config());
        assert!(!parse(&["tallywall", "config", "validate", "other.toml"]).needs_config());
        assert!(!parse(&["tallywall", "-c", "broken.toml", "config", "validate"]).needs_config());
        assert!(parse(&["tallywall", "config", "show"]).needs_config());
        assert!(parse(&["tallywall", "render"]).needs_config());
        assert!(parse(&["tallywall", "watch"]).needs_config());
    }

    #[test]
    fn test_rejects_bad_dates_and_granularity() {
        assert!(Cli::try_parse_from(["tallywall", "list", "--today", "yesterday"]).is_err());
        assert!(Cli::try_parse_from(["tallywall", "list", "-g", "weekly"]).is_err());
    }
}
