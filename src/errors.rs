// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error type shared by every stage of the renderer.  Configuration
//! problems are caught before a single pixel is evaluated; the only
//! errors that can happen afterwards are a worker dying or the image
//! failing to reach the disk.

use failure::Fail;
use std::io;

/// Everything that can go wrong between reading a configuration and
/// writing an image.
#[derive(Debug, Fail)]
pub enum MandelError {
    /// Width or height was zero.
    #[fail(display = "image dimensions must be positive, got {}x{}", width, height)]
    EmptyImage {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// Width or height is past what the encoders can address.
    #[fail(display = "image dimensions {}x{} exceed the limit of {} per side", width, height, limit)]
    ImageTooLarge {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
        /// Largest side we accept.
        limit: usize,
    },

    /// A viewport bound was NaN or infinite.
    #[fail(display = "viewport bound {} is not a finite number", name)]
    NonFiniteBound {
        /// Which bound was bad.
        name: &'static str,
    },

    /// A viewport lower bound was not strictly below its upper bound.
    #[fail(display = "malformed viewport: {} must be less than {}", lower, upper)]
    MalformedViewport {
        /// Name of the lower bound.
        lower: &'static str,
        /// Name of the upper bound.
        upper: &'static str,
    },

    /// The iteration budget is larger than we are willing to run.
    #[fail(display = "iteration count {} exceeds the limit of {}", requested, limit)]
    TooManyIterations {
        /// What the caller asked for.
        requested: u32,
        /// The configured ceiling.
        limit: u32,
    },

    /// The escape radius cannot serve as a divergence bound.
    #[fail(display = "escape radius must be between 2 and 1e100, got {}", _0)]
    BadEscapeRadius(f64),

    /// Zero worker threads were requested.
    #[fail(display = "thread count must be at least 1")]
    NoThreads,

    /// A command line value could not be parsed.
    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),

    /// The output path names a format we cannot encode.
    #[fail(display = "unsupported output format: {}", _0)]
    UnsupportedFormat(String),

    /// One of the render workers panicked; the grid is incomplete.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// Writing the image failed.
    #[fail(display = "could not write image: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for MandelError {
    fn from(err: io::Error) -> Self {
        MandelError::Io(err)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MandelError>;
