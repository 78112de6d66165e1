// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `tallywall` - CLI for the tally wall
//!
//! Renders the wall to SVG, lists its records, answers hover queries and
//! keeps a rendered file current as days pass.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write as _;

use clap::Parser;
use kurbo::Point;

use tallywall::cli::{
    Cli, Command, ConfigCommand, HoverCommand, ListCommand, RenderCommand, ViewArgs, WatchCommand,
};
use tallywall::report::{format_list, list_entries};
use tallywall::watch::{Watcher, local_today, write_svg};
use tallywall::{Config, Session, init_logging, read_events};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration; `config path` and `config validate` work without it
    let mut config = if cli.needs_config() {
        Config::load_from(cli.config.clone())?
    } else {
        Config::default()
    };
    if let Some(data) = cli.data.clone() {
        config.data.path = Some(data);
    }

    // Execute the command
    match cli.command {
        Command::Render(cmd) => handle_render(config, &cmd),
        Command::List(cmd) => handle_list(config, &cmd),
        Command::Hover(cmd) => handle_hover(config, &cmd),
        Command::Watch(cmd) => handle_watch(config, cmd),
        Command::Config(cmd) => handle_config(&config, cli.config, cmd),
    }
}

/// Applies the view overrides and builds the session they describe.
fn open_session(mut config: Config, view: &ViewArgs) -> Result<(Config, Session), tallywall::Error> {
    view.apply(&mut config);
    config.validate()?;
    let today = view.today.unwrap_or_else(local_today);
    let session = Session::from_config(&config, today);
    Ok((config, session))
}

fn handle_render(config: Config, cmd: &RenderCommand) -> Result<(), Box<dyn std::error::Error>> {
    let (config, mut session) = open_session(config, &cmd.view)?;
    if cmd.fit {
        session.fit_all();
    }
    if let Some(path) = &cmd.events {
        let events = read_events(path)?;
        tracing::debug!(count = events.len(), "replaying events");
        for event in events {
            session.handle(event);
        }
    }
    if let Some([x, y]) = cmd.hover.as_deref() {
        session.hover(Point::new(*x, *y));
    }

    let svg = session.render(&config.renderer()?);
    match &cmd.out {
        Some(path) => {
            write_svg(path, &svg)?;
            tracing::info!(path = %path.display(), records = session.sheet().len(), "wall written");
        }
        None => std::io::stdout().write_all(svg.as_bytes())?,
    }
    Ok(())
}

fn handle_list(config: Config, cmd: &ListCommand) -> Result<(), Box<dyn std::error::Error>> {
    let (_, session) = open_session(config, &cmd.view)?;
    let entries = list_entries(session.sheet(), cmd.limit);
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", format_list(&entries));
    }
    Ok(())
}

fn handle_hover(config: Config, cmd: &HoverCommand) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut session) = open_session(config, &cmd.view)?;
    session.hover(Point::new(cmd.x, cmd.y));
    match session.tooltip() {
        Some(tooltip) => println!("{}", tooltip.caption),
        None => println!("no record at ({}, {})", cmd.x, cmd.y),
    }
    Ok(())
}

fn handle_watch(config: Config, cmd: WatchCommand) -> Result<(), Box<dyn std::error::Error>> {
    let (config, session) = open_session(config, &cmd.view)?;
    let interval = cmd
        .interval
        .filter(|&secs| secs > 0)
        .map_or_else(|| config.poll_interval(), std::time::Duration::from_secs);
    let renderer = config.renderer()?;
    let pinned_today = cmd.view.today;
    let watcher = Watcher::new(session, renderer, cmd.out, interval, move || {
        pinned_today.unwrap_or_else(local_today)
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watcher.run())?;
    Ok(())
}

fn handle_config(
    config: &Config,
    config_path: Option<std::path::PathBuf>,
    cmd: ConfigCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Data]");
                match &config.data.path {
                    Some(path) => println!("  Path:           {}", path.display()),
                    None => println!("  Path:           (built-in demo family)"),
                }
                println!("  Granularity:    {:?}", config.data.granularity);
                println!();
                println!("[View]");
                println!(
                    "  Surface:        {} x {}",
                    config.view.width, config.view.height
                );
                println!(
                    "  Scale:          {} ({} to {})",
                    config.view.scale, config.view.min_scale, config.view.max_scale
                );
                println!(
                    "  Offset:         ({}, {})",
                    config.view.offset_x, config.view.offset_y
                );
                println!("  Zoom step:      {}", config.view.zoom_step);
                println!("  Cull margin:    {}", config.view.cull_margin);
                println!();
                println!("[Layout]");
                println!("  Cell width:     {}", config.layout.cell_width);
                println!("  Row height:     {}", config.layout.row_height);
                match config.layout.items_per_row {
                    Some(n) => println!("  Per row:        {n}"),
                    None => println!("  Wrap margin:    {}", config.layout.wrap_margin),
                }
                println!();
                println!("[Marks]");
                println!(
                    "  Hit box:        {} x {}",
                    config.marks.width, config.marks.height
                );
                println!("  Advance:        {}", config.marks.advance);
                println!("  Stroke width:   {}", config.marks.stroke_width);
                println!("  Background:     {}", config.marks.background);
                println!();
                println!("[Watch]");
                println!("  Poll interval:  {}s", config.watch.poll_interval_secs);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}
