// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a finished grid into RGB pixels and writes them to disk.

use image::png::PNGEncoder;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::colormap::Colormap;
use crate::errors::{MandelError, Result};
use crate::legend::{self, Legend};
use crate::render::RasterGrid;

/// Image encodings we know how to write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Portable Network Graphics.
    Png,
    /// Binary portable pixmap (P6).
    Pnm,
}

impl OutputFormat {
    /// Picks a format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OutputFormat> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match extension.as_ref().map(String::as_str) {
            Some("png") => Ok(OutputFormat::Png),
            Some("ppm") | Some("pnm") => Ok(OutputFormat::Pnm),
            _ => Err(MandelError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// An RGB8 image, row-major, three bytes per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// `width * height * 3` bytes.
    pub pixels: Vec<u8>,
}

impl Raster {
    fn blank(width: usize, height: usize) -> Self {
        Raster {
            width,
            height,
            pixels: vec![0 as u8; width * height * 3],
        }
    }

    fn put(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let offset = (y * self.width + x) * 3;
        self.pixels[offset..offset + 3].copy_from_slice(&rgb);
    }

    /// The color at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 3;
        let p = &self.pixels[offset..offset + 3];
        Some([p[0], p[1], p[2]])
    }
}

const TICK_COUNT: usize = 5;
const TICK_COLOR: [u8; 3] = [255, 255, 255];

/// Colors every cell of the grid; pixel (x, y) of the raster is cell
/// (x, y) of the grid.  With `with_legend` the color bar is appended
/// on the right, separated by a black gap.
pub fn compose(grid: &RasterGrid, colormap: Colormap, with_legend: bool) -> Raster {
    let extra = if with_legend { legend::WIDTH } else { 0 };
    let mut raster = Raster::blank(grid.width() + extra, grid.height());

    for (y, row) in grid.rows().enumerate() {
        for (x, &count) in row.iter().enumerate() {
            raster.put(x, y, colormap.color(count, grid.max_iter()));
        }
    }

    if with_legend {
        let bar = Legend::new(colormap, grid.max_iter(), grid.height());
        let left = grid.width() + legend::GAP;
        for y in 0..bar.height() {
            let rgb = bar.color_at_row(y);
            for x in left..left + legend::BAR {
                raster.put(x, y, rgb);
            }
        }
        for (row, count) in bar.ticks(TICK_COUNT) {
            info!("legend row {}: {} iterations", row, count);
            for x in left + legend::BAR..left + legend::WIDTH - legend::GAP {
                raster.put(x, row, TICK_COLOR);
            }
        }
    }

    raster
}

/// Encodes the raster in the format named by the path's extension.
/// The image is encoded in memory and written to a temporary file in
/// the destination directory, which is renamed over `path` only once
/// every byte is on disk.  A failure at any point leaves `path`
/// untouched.
pub fn write_image<P: AsRef<Path>>(path: P, raster: &Raster) -> Result<()> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    let (width, height) = (raster.width as u32, raster.height as u32);
    let mut encoded: Vec<u8> = Vec::with_capacity(raster.pixels.len() + 64);
    match format {
        OutputFormat::Png => PNGEncoder::new(&mut encoded).encode(
            &raster.pixels,
            width,
            height,
            ColorType::RGB(8),
        )?,
        OutputFormat::Pnm => {
            let mut encoder = PNMEncoder::new(&mut encoded)
                .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
            encoder.encode(&raster.pixels[..], width, height, ColorType::RGB(8))?
        }
    }

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = NamedTempFile::new_in(directory)?;
    staging.write_all(&encoded)?;
    staging.as_file().sync_all()?;
    staging.persist(path).map_err(|e| e.error)?;
    debug!("wrote {} bytes to {}", encoded.len(), path.display());
    Ok(())
}
