// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeps a rendered wall up to date as days pass.
//!
//! The loop wakes on a fixed interval, asks a clock for today's date, and
//! appends records and rewrites the output only when the date changed.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use tallywall_svg::SvgRenderer;
use tokio::time::MissedTickBehavior;

use crate::error::{Error, Result};
use crate::session::{Event, Session};

/// Today's date in the local time zone.
#[must_use]
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Writes `svg` to `path`.
///
/// # Errors
///
/// Returns [`Error::Write`] naming the path.
pub fn write_svg(path: &Path, svg: &str) -> Result<()> {
    std::fs::write(path, svg).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// A session re-rendered into a file whenever the date moves on.
pub struct Watcher<C> {
    session: Session,
    renderer: SvgRenderer,
    out: PathBuf,
    interval: Duration,
    clock: C,
    last_day: Option<NaiveDate>,
}

impl<C> fmt::Debug for Watcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("session", &self.session)
            .field("renderer", &self.renderer)
            .field("out", &self.out)
            .field("interval", &self.interval)
            .field("last_day", &self.last_day)
            .finish_non_exhaustive()
    }
}

impl<C: FnMut() -> NaiveDate> Watcher<C> {
    /// Watches `session`, writing to `out` every time `clock` reports a new day.
    #[must_use]
    pub fn new(
        session: Session,
        renderer: SvgRenderer,
        out: PathBuf,
        interval: Duration,
        clock: C,
    ) -> Self {
        Self {
            session,
            renderer,
            out,
            interval,
            clock,
            last_day: None,
        }
    }

    /// The watched session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Checks the clock once. Returns `true` when the output was rewritten.
    ///
    /// The first call always writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn tick(&mut self) -> Result<bool> {
        let today = (self.clock)();
        let first = self.last_day.is_none();
        if self.last_day == Some(today) {
            return Ok(false);
        }
        self.last_day = Some(today);
        let changed = self.session.handle(Event::Tick { today });
        if !(first || changed) {
            return Ok(false);
        }
        write_svg(&self.out, &self.session.render(&self.renderer))?;
        tracing::info!(
            path = %self.out.display(),
            records = self.session.sheet().len(),
            %today,
            "wall written"
        );
        Ok(true)
    }

    /// Runs until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Stops at the first write error.
    pub async fn run_until(mut self, shutdown: impl Future<Output = ()>) -> Result<Self> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick()?;
                }
                () = &mut shutdown => {
                    tracing::info!("watch stopped");
                    return Ok(self);
                }
            }
        }
    }

    /// Runs until Ctrl‑C.
    ///
    /// # Errors
    ///
    /// Stops at the first write error.
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            path = %self.out.display(),
            interval_secs = self.interval.as_secs(),
            "watching for new days, press Ctrl-C to stop"
        );
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
        .map(drop)
    }
}
