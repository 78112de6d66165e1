// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How fitted content should be positioned inside the surface.
///
/// Consulted by [`crate::Camera::fit_rect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Center the fitted rectangle on the surface.
    Center,
    /// Put the world‑space minimum corner at the surface origin.
    ///
    /// This matches how a wall is first shown: rows grow to the right and
    /// downwards from the top left corner.
    #[default]
    AlignMin,
}
