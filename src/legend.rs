// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The intensity legend: a vertical color bar drawn beside the image,
//! with the iteration budget at the top and zero at the bottom, and
//! tick marks that tie rows of the bar back to escape counts.

use crate::colormap::Colormap;

/// Blank columns between the image and the bar.
pub const GAP: usize = 8;
/// Width of the color bar itself.
pub const BAR: usize = 24;
/// Length of a tick mark, drawn to the right of the bar.
pub const TICK: usize = 6;
/// Total columns the legend adds to the image.
pub const WIDTH: usize = GAP + BAR + TICK;

/// A color bar of a given height for one colormap and budget.
#[derive(Copy, Clone, Debug)]
pub struct Legend {
    colormap: Colormap,
    max_iter: u32,
    height: usize,
}

impl Legend {
    /// Builds a legend `height` rows tall.
    pub fn new(colormap: Colormap, max_iter: u32, height: usize) -> Self {
        Legend {
            colormap,
            max_iter,
            height,
        }
    }

    /// Rows in the bar.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The escape count represented by a row of the bar; the top row
    /// is the budget, the bottom row zero.
    pub fn count_at_row(&self, row: usize) -> u32 {
        if self.height <= 1 {
            return self.max_iter;
        }
        let span = (self.height - 1) as u64;
        let from_bottom = span - (row.min(self.height - 1) as u64);
        (from_bottom * u64::from(self.max_iter) / span) as u32
    }

    /// The color drawn on a row of the bar.
    pub fn color_at_row(&self, row: usize) -> [u8; 3] {
        self.colormap.color(self.count_at_row(row), self.max_iter)
    }

    /// `n` evenly spaced ticks from top to bottom, as (row, count).
    pub fn ticks(&self, n: usize) -> Vec<(usize, u32)> {
        if self.height == 0 || n == 0 {
            return vec![];
        }
        if n == 1 || self.height == 1 {
            return vec![(0, self.count_at_row(0))];
        }
        let mut ticks: Vec<(usize, u32)> = (0..n)
            .map(|i| i * (self.height - 1) / (n - 1))
            .map(|row| (row, self.count_at_row(row)))
            .collect();
        ticks.dedup();
        ticks
    }
}
