#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which the orbit of z = z² + c, started at zero, stays bounded.  For
//! each pixel of an image we pick the point it covers, iterate, and
//! count how many steps the orbit takes to leave the circle of radius
//! 2.  That count, the escape time, is the number used to color the
//! pixel; points that never leave within the budget are presumed to be
//! inside the set.
//!
//! A render goes through three stages, strictly in order:
//!
//! 1. a [`RenderConfig`] is validated, so a bad image size, viewport,
//!    or iteration budget fails before any work is done;
//! 2. the [`Renderer`] evaluates every pixel once into a [`RasterGrid`],
//!    optionally splitting the rows across worker threads;
//! 3. [`output::compose`] colors the grid and appends a legend, and
//!    [`output::write_image`] encodes it as PNG or PPM.
//!
//! ```no_run
//! use mandelbrot::{output, RenderConfig, Renderer};
//!
//! let config = RenderConfig::default();
//! let grid = Renderer::new(config.clone())?.render()?;
//! let raster = output::compose(&grid, config.colormap, config.legend);
//! output::write_image("mandelbrot.png", &raster)?;
//! # Ok::<(), mandelbrot::MandelError>(())
//! ```

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;
extern crate tempfile;

pub mod colormap;
pub mod config;
pub mod errors;
pub mod escape;
pub mod legend;
pub mod output;
pub mod planes;
pub mod render;

pub use colormap::Colormap;
pub use config::RenderConfig;
pub use errors::{MandelError, Result};
pub use escape::{evaluate, Fractal, ESCAPE_RADIUS, MAX_ESCAPE_RADIUS};
pub use planes::{Pixel, PlaneMapper, Viewport};
pub use render::{RasterGrid, Renderer};
