// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane (the Viewport) bounded by
//! x_min..x_max on the real axis and y_min..y_max on the imaginary
//! axis.
use num::Complex;

use crate::errors::{MandelError, Result};

/// The rectangular region of the complex plane being sampled.  The
/// real part of each sample is the x-component, the imaginary part the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge on the real axis (inclusive).
    pub x_min: f64,
    /// Right edge on the real axis (never sampled).
    pub x_max: f64,
    /// Low edge on the imaginary axis (inclusive).
    pub y_min: f64,
    /// High edge on the imaginary axis (never sampled).
    pub y_max: f64,
}

impl Viewport {
    /// Builds a viewport, insisting that all four bounds are finite
    /// and that each lower bound is strictly below its upper bound.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Viewport> {
        let viewport = Viewport {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Builds a viewport from its lower-left and upper-right corners.
    pub fn from_corners(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Result<Viewport> {
        Viewport::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// Checks the viewport invariants.  Fields are public, so this is
    /// run again whenever a configuration is validated.
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("x_min", self.x_min),
            ("x_max", self.x_max),
            ("y_min", self.y_min),
            ("y_max", self.y_max),
        ];
        for &(name, value) in bounds.iter() {
            if !value.is_finite() {
                return Err(MandelError::NonFiniteBound { name });
            }
        }

        if self.x_min >= self.x_max {
            return Err(MandelError::MalformedViewport {
                lower: "x_min",
                upper: "x_max",
            });
        }

        if self.y_min >= self.y_max {
            return Err(MandelError::MalformedViewport {
                lower: "y_min",
                upper: "y_max",
            });
        }

        Ok(())
    }

    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            x_min: -2.0,
            x_max: 1.0,
            y_min: -1.5,
            y_max: 1.5,
        }
    }
}

/// Describes the x, y of a pixel: column, then row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a width x height raster onto a viewport.  Pixel
/// (0, 0) lands on (x_min, y_min); the upper bounds are never sampled
/// because the step is span / width rather than span / (width - 1).
/// Aspect ratio is whatever the caller makes it.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Width of the integral plane.
    pub width: usize,
    /// Height of the integral plane.
    pub height: usize,
    /// The complex region being sampled.
    pub viewport: Viewport,
}

impl PlaneMapper {
    /// Takes the size of the integral plane and the viewport it maps
    /// onto.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper> {
        if width == 0 || height == 0 {
            return Err(MandelError::EmptyImage { width, height });
        }
        viewport.validate()?;
        Ok(PlaneMapper {
            width,
            height,
            viewport,
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; a mapper with an empty plane cannot be built.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel on the integral cartesian plane, return the point
    /// it samples on the complex plane.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let v = &self.viewport;
        Complex::new(
            v.x_min + (pixel.0 as f64 / self.width as f64) * (v.x_max - v.x_min),
            v.y_min + (pixel.1 as f64 / self.height as f64) * (v.y_max - v.y_min),
        )
    }

    /// Given a point on the complex plane, return the pixel whose
    /// sample cell contains it, or None if it lies outside the
    /// viewport.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let v = &self.viewport;
        let left = (point.re - v.x_min) / v.width() * (self.width as f64);
        let top = (point.im - v.y_min) / v.height() * (self.height as f64);
        if !(left >= 0.0 && top >= 0.0) {
            return None;
        }
        let (left, top) = (left.floor() as usize, top.floor() as usize);
        if left >= self.width || top >= self.height {
            return None;
        }
        Some(Pixel(left, top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_fails_on_bad_shape() {
        assert!(Viewport::new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, 1.0, 1.0, -1.0).is_err());
        assert!(Viewport::new(0.0, 0.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn viewport_fails_on_non_finite_bounds() {
        match Viewport::new(std::f64::NAN, 1.0, -1.0, 1.0) {
            Err(MandelError::NonFiniteBound { name }) => assert_eq!(name, "x_min"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(Viewport::new(-1.0, std::f64::INFINITY, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, 1.0, std::f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn viewport_from_corners() {
        let v = Viewport::from_corners(Complex::new(-2.0, -1.5), Complex::new(1.0, 1.5)).unwrap();
        assert_eq!(v, Viewport::default());
        assert_eq!(v.width(), 3.0);
        assert_eq!(v.height(), 3.0);
    }

    #[test]
    fn planemapper_fails_on_empty_plane() {
        assert!(PlaneMapper::new(0, 4, Viewport::default()).is_err());
        assert!(PlaneMapper::new(4, 0, Viewport::default()).is_err());
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let v = Viewport::new(0.0, 5.0, 0.0, 5.0).unwrap();
        let pm = PlaneMapper::new(5, 5, v).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_point_on_mixed_planes() {
        let v = Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap();
        let pm = PlaneMapper::new(4, 4, v).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn mapping_is_half_open() {
        let pm = PlaneMapper::new(800, 600, Viewport::default()).unwrap();
        let first = pm.pixel_to_point(&Pixel(0, 0));
        assert_eq!(first, Complex::new(-2.0, -1.5));
        let last = pm.pixel_to_point(&Pixel(799, 599));
        assert!(last.re < 1.0);
        assert!(last.im < 1.5);
    }

    #[test]
    fn axes_scale_independently() {
        let v = Viewport::new(0.0, 1.0, 0.0, 10.0).unwrap();
        let pm = PlaneMapper::new(10, 10, v).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(5, 5)), Complex::new(0.5, 5.0));
    }

    #[test]
    fn point_to_pixel_on_mixed_planes() {
        let v = Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap();
        let pm = PlaneMapper::new(4, 4, v).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Some(Pixel(2, 2)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.0, -2.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-1.5, 1.9)), Some(Pixel(0, 3)));
    }

    #[test]
    fn point_to_pixel_outside_viewport() {
        let pm = PlaneMapper::new(800, 600, Viewport::default()).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 2.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(1.0, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.1, 0.0)), None);
    }

    #[test]
    fn point_to_pixel_finds_the_cardioid() {
        let pm = PlaneMapper::new(800, 600, Viewport::default()).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(-0.5, 0.0)), Some(Pixel(400, 300)));
    }
}
