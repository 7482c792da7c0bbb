// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Color ramps.  Every ramp takes an escape count, normalizes it
//! against the iteration budget, and returns an RGB triple in which
//! no channel ever decreases as the count goes up.  Points that never
//! escaped sit at the top of the ramp.

use std::fmt;
use std::str::FromStr;

use crate::errors::MandelError;

/// The available color ramps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Colormap {
    /// Black through red and yellow to white.
    Hot,
    /// Black to pure red.
    Red,
    /// Black to white.
    Grayscale,
}

const NAMES: [&str; 3] = ["hot", "red", "gray"];

// Where each channel of the hot ramp starts and finishes rising.
const HOT_RED: (f64, f64) = (0.0, 0.365);
const HOT_GREEN: (f64, f64) = (0.365, 0.746);
const HOT_BLUE: (f64, f64) = (0.746, 1.0);

#[inline]
fn ramp(t: f64, (start, end): (f64, f64)) -> f64 {
    ((t - start) / (end - start)).max(0.0).min(1.0)
}

#[inline]
fn channel(v: f64) -> u8 {
    (v * 255.0).round() as u8
}

impl Colormap {
    /// Identifiers accepted by `from_str`.
    pub fn names() -> &'static [&'static str] {
        &NAMES
    }

    /// Maps an escape count to a color.  Counts above `max_iter` are
    /// treated as `max_iter`; a zero budget saturates everything.
    pub fn color(self, count: u32, max_iter: u32) -> [u8; 3] {
        let t = if max_iter == 0 {
            1.0
        } else {
            f64::from(count.min(max_iter)) / f64::from(max_iter)
        };
        self.color_at(t)
    }

    /// Maps a normalized position in [0, 1] to a color.
    pub fn color_at(self, t: f64) -> [u8; 3] {
        let t = t.max(0.0).min(1.0);
        match self {
            Colormap::Hot => [
                channel(ramp(t, HOT_RED)),
                channel(ramp(t, HOT_GREEN)),
                channel(ramp(t, HOT_BLUE)),
            ],
            Colormap::Red => [channel(t), 0, 0],
            Colormap::Grayscale => {
                let v = channel(t);
                [v, v, v]
            }
        }
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Colormap::Hot
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Colormap::Hot => "hot",
            Colormap::Red => "red",
            Colormap::Grayscale => "gray",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Colormap {
    type Err = MandelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hot" => Ok(Colormap::Hot),
            "red" => Ok(Colormap::Red),
            "gray" | "grey" | "grayscale" => Ok(Colormap::Grayscale),
            _ => Err(MandelError::InvalidArgument(format!(
                "unknown colormap '{}', expected one of {}",
                s,
                NAMES.join(", ")
            ))),
        }
    }
}
