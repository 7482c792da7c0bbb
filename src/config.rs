// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render configuration.  Everything about a render is fixed here
//! before any work starts, and validated all at once so a bad value
//! never produces a partial image.

use crate::colormap::Colormap;
use crate::errors::{MandelError, Result};
use crate::escape::{Fractal, ESCAPE_RADIUS, MAX_ESCAPE_RADIUS};
use crate::planes::Viewport;

/// Ceiling on the iteration budget.  At a million steps per pixel an
/// 800x600 render of the set's interior already takes a very long
/// time; anything past that is almost certainly a typo.
pub const MAX_ITERATIONS: u32 = 1_000_000;

/// Ceiling on either side of the raster.  Keeps the RGB buffer and the
/// legend strip well inside what the encoders' u32 sizes can describe.
pub const MAX_DIMENSION: usize = 65_535;

/// The parameters of a single render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Raster width in pixels.
    pub width: usize,
    /// Raster height in pixels.
    pub height: usize,
    /// The region of the complex plane to sample.
    pub viewport: Viewport,
    /// The recurrence to iterate.
    pub fractal: Fractal,
    /// Iteration budget per pixel.
    pub max_iter: u32,
    /// Orbit modulus past which a point counts as escaped.
    pub escape_radius: f64,
    /// Ramp used to color escape counts.
    pub colormap: Colormap,
    /// Number of worker threads; the grid is split into this many row
    /// bands.
    pub threads: usize,
    /// Whether to attach the intensity legend to the image.
    pub legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 800,
            height: 600,
            viewport: Viewport::default(),
            fractal: Fractal::default(),
            max_iter: 100,
            escape_radius: ESCAPE_RADIUS,
            colormap: Colormap::default(),
            threads: 1,
            legend: true,
        }
    }
}

impl RenderConfig {
    /// Rejects any configuration that cannot produce a complete grid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MandelError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }

        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(MandelError::ImageTooLarge {
                width: self.width,
                height: self.height,
                limit: MAX_DIMENSION,
            });
        }

        self.viewport.validate()?;

        if self.max_iter > MAX_ITERATIONS {
            return Err(MandelError::TooManyIterations {
                requested: self.max_iter,
                limit: MAX_ITERATIONS,
            });
        }

        if !(self.escape_radius >= ESCAPE_RADIUS && self.escape_radius <= MAX_ESCAPE_RADIUS) {
            return Err(MandelError::BadEscapeRadius(self.escape_radius));
        }

        if self.threads == 0 {
            return Err(MandelError::NoThreads);
        }

        Ok(())
    }
}
