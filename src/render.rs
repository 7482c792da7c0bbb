// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The grid sampler.  Every pixel of the raster is mapped onto the
//! viewport and handed to the escape-time evaluator exactly once.
//! Pixels don't depend on one another, so the threaded renderer just
//! slices the grid into bands of rows and gives each worker its own
//! band; nothing is shared for writing and nothing is locked.

use itertools::iproduct;
use log::{debug, info};

use crate::config::RenderConfig;
use crate::errors::{MandelError, Result};
use crate::planes::{Pixel, PlaneMapper};

/// A completed grid of escape counts, stored row-major: rows follow
/// the imaginary axis, columns the real axis.  Only a `Renderer` can
/// make one and nothing can change it afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterGrid {
    width: usize,
    height: usize,
    max_iter: u32,
    counts: Vec<u32>,
}

impl RasterGrid {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The iteration budget the grid was rendered with.
    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True only for a grid with no cells, which cannot be rendered.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The escape count at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.counts[y * self.width + x])
    }

    /// The raw row-major counts.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<u32> {
        self.counts.chunks(self.width)
    }
}

/// Holds a validated configuration and the plane mapping derived from
/// it.  Once built it is read-only, so one renderer can be shared
/// across any number of workers.
#[derive(Debug)]
pub struct Renderer {
    config: RenderConfig,
    plane: PlaneMapper,
}

impl Renderer {
    /// Validates the configuration up front; a renderer that exists
    /// can always complete a render.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let plane = PlaneMapper::new(config.width, config.height, config.viewport)?;
        Ok(Renderer { config, plane })
    }

    /// The configuration this renderer was built from.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The pixel to complex-plane mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    #[inline]
    fn sample(&self, pixel: &Pixel) -> u32 {
        let c = self.plane.pixel_to_point(pixel);
        self.config
            .fractal
            .escape_time(c, self.config.max_iter, self.config.escape_radius)
    }

    /// Fills a band of whole rows starting at `first_row`.
    fn fill_band(&self, first_row: usize, band: &mut [u32]) {
        let width = self.plane.width;
        for (i, cell) in band.iter_mut().enumerate() {
            *cell = self.sample(&Pixel(i % width, first_row + i / width));
        }
    }

    fn grid(&self, counts: Vec<u32>) -> RasterGrid {
        RasterGrid {
            width: self.plane.width,
            height: self.plane.height,
            max_iter: self.config.max_iter,
            counts,
        }
    }

    /// The single-threaded reference render, filled row by row.
    pub fn render_single(&self) -> RasterGrid {
        info!(
            "rendering {}x{} at {} iterations on one thread",
            self.plane.width, self.plane.height, self.config.max_iter
        );
        let counts = iproduct!(0..self.plane.height, 0..self.plane.width)
            .map(|(row, column)| self.sample(&Pixel(column, row)))
            .collect();
        self.grid(counts)
    }

    /// Renders with `config.threads` workers, each owning a contiguous
    /// band of rows.  The result is identical to `render_single`.
    pub fn render(&self) -> Result<RasterGrid> {
        let (width, height) = (self.plane.width, self.plane.height);
        let threads = self.config.threads.min(height);
        if threads == 1 {
            return Ok(self.render_single());
        }

        info!(
            "rendering {}x{} at {} iterations on {} threads",
            width, height, self.config.max_iter, threads
        );

        let rows_per_band = (height + threads - 1) / threads;
        let mut counts = vec![0 as u32; self.plane.len()];
        crossbeam::scope(|spawner| {
            for (index, band) in counts.chunks_mut(rows_per_band * width).enumerate() {
                let first_row = index * rows_per_band;
                spawner.spawn(move |_| {
                    debug!(
                        "band {} covers rows {}..{}",
                        index,
                        first_row,
                        first_row + band.len() / width
                    );
                    self.fill_band(first_row, band);
                });
            }
        })
        .map_err(|_| MandelError::WorkerPanicked)?;

        Ok(self.grid(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::Viewport;
    use itertools::iproduct;

    fn small_config(threads: usize) -> RenderConfig {
        RenderConfig {
            width: 48,
            height: 31,
            max_iter: 60,
            threads,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn renderer_rejects_bad_config() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(Renderer::new(config).is_err());
    }

    #[test]
    fn grid_has_one_cell_per_pixel() {
        let grid = Renderer::new(small_config(1)).unwrap().render_single();
        assert_eq!(grid.len(), 48 * 31);
        assert_eq!(grid.rows().count(), 31);
        assert!(grid.rows().all(|row| row.len() == 48));
        assert!(grid.counts().iter().all(|&c| c <= 60));
    }

    #[test]
    fn cells_match_the_evaluator() {
        let renderer = Renderer::new(small_config(1)).unwrap();
        let grid = renderer.render_single();
        for (x, y) in iproduct!(0..48, 0..31) {
            let c = renderer.plane().pixel_to_point(&Pixel(x, y));
            assert_eq!(grid.get(x, y), Some(crate::escape::evaluate(c, 60)));
        }
    }

    #[test]
    fn out_of_range_cells_are_none() {
        let grid = Renderer::new(small_config(1)).unwrap().render_single();
        assert_eq!(grid.get(48, 0), None);
        assert_eq!(grid.get(0, 31), None);
    }

    #[test]
    fn threaded_render_matches_single() {
        let single = Renderer::new(small_config(1)).unwrap().render_single();
        for threads in &[2, 3, 4, 7, 31, 64] {
            let threaded = Renderer::new(small_config(*threads))
                .unwrap()
                .render()
                .unwrap();
            assert_eq!(threaded, single, "{} threads disagree", threads);
        }
    }

    #[test]
    fn burning_ship_cells_follow_the_fold() {
        let config = RenderConfig {
            fractal: crate::escape::Fractal::BurningShip,
            ..small_config(3)
        };
        let renderer = Renderer::new(config).unwrap();
        let grid = renderer.render().unwrap();
        for (x, y) in iproduct!(0..48, 0..31) {
            let c = renderer.plane().pixel_to_point(&Pixel(x, y));
            let expected = crate::escape::Fractal::BurningShip.escape_time(c, 60, 2.0);
            assert_eq!(grid.get(x, y), Some(expected));
        }
        assert_ne!(grid, Renderer::new(small_config(3)).unwrap().render().unwrap());
    }

    #[test]
    fn zero_budget_renders_zeros() {
        let config = RenderConfig {
            max_iter: 0,
            ..small_config(2)
        };
        let grid = Renderer::new(config).unwrap().render().unwrap();
        assert!(grid.counts().iter().all(|&c| c == 0));
        assert_eq!(grid.max_iter(), 0);
    }

    #[test]
    fn single_pixel_samples_the_corner() {
        let config = RenderConfig {
            width: 1,
            height: 1,
            viewport: Viewport::new(3.0, 4.0, 0.0, 1.0).unwrap(),
            ..RenderConfig::default()
        };
        let grid = Renderer::new(config).unwrap().render().unwrap();
        assert_eq!(grid.counts().to_vec(), vec![1u32]);
    }
}
