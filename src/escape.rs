// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  Take a point c on the complex plane,
//! start an orbit at zero, and repeatedly apply z = z² + c.  Once the
//! orbit leaves the circle of radius 2 it is guaranteed to run off to
//! infinity, so the number of steps it took to get there measures how
//! "fast" the point escapes.  Points that never leave within the budget
//! are presumed to be inside the set.
//!
//! The Burning Ship runs the same loop, but folds z into the first
//! quadrant (|Re z| + i|Im z|) before squaring it.

use std::fmt;
use std::str::FromStr;

use num::Complex;

use crate::errors::MandelError;

/// Any orbit whose modulus exceeds this will diverge.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Largest escape radius we accept.  The test compares squared moduli,
/// and the square of this is still far from overflowing an f64.
pub const MAX_ESCAPE_RADIUS: f64 = 1e100;

/// Returns the iteration at which the orbit of `c` was first seen
/// outside the escape radius, or `max_iter` if it never was.
///
/// The radius check happens before the update, so an orbit detected
/// outside at step `n` reports `n`.  A budget of zero returns zero
/// without iterating.
///
/// Non-finite inputs are unsupported; `RenderConfig` rejects them long
/// before they get here.
///
/// ```
/// use mandelbrot::escape::evaluate;
/// use num::Complex;
///
/// assert_eq!(evaluate(Complex::new(3.0, 0.0), 100), 1);
/// assert_eq!(evaluate(Complex::new(0.0, 0.0), 100), 100);
/// ```
#[inline]
pub fn evaluate(c: Complex<f64>, max_iter: u32) -> u32 {
    evaluate_with_radius(c, max_iter, ESCAPE_RADIUS)
}

/// As `evaluate`, with a caller-chosen escape radius no larger than
/// `MAX_ESCAPE_RADIUS`.
#[inline]
pub fn evaluate_with_radius(c: Complex<f64>, max_iter: u32, radius: f64) -> u32 {
    escape_time(c, max_iter, radius, |z| z * z + c)
}

#[inline]
fn escape_time<F>(c: Complex<f64>, max_iter: u32, radius: f64, step: F) -> u32
where
    F: Fn(Complex<f64>) -> Complex<f64>,
{
    let limit = radius * radius;
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for n in 0..max_iter {
        if z.norm_sqr() > limit {
            return n;
        }
        z = step(z);
    }
    max_iter
}

/// The recurrences we know how to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fractal {
    /// z = z² + c
    Mandelbrot,
    /// z = (|Re z| + i|Im z|)² + c
    BurningShip,
}

const FRACTAL_NAMES: [&str; 2] = ["mandelbrot", "burningship"];

impl Fractal {
    /// Identifiers accepted by `from_str`.
    pub fn names() -> &'static [&'static str] {
        &FRACTAL_NAMES
    }

    /// Escape count of `c` under this recurrence, with the same
    /// check-before-update rule as `evaluate`.
    #[inline]
    pub fn escape_time(self, c: Complex<f64>, max_iter: u32, radius: f64) -> u32 {
        match self {
            Fractal::Mandelbrot => evaluate_with_radius(c, max_iter, radius),
            Fractal::BurningShip => escape_time(c, max_iter, radius, |z| {
                let folded = Complex::new(z.re.abs(), z.im.abs());
                folded * folded + c
            }),
        }
    }
}

impl Default for Fractal {
    fn default() -> Self {
        Fractal::Mandelbrot
    }
}

impl fmt::Display for Fractal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Fractal::Mandelbrot => "mandelbrot",
            Fractal::BurningShip => "burningship",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Fractal {
    type Err = MandelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "").replace('_', "").as_str() {
            "mandelbrot" => Ok(Fractal::Mandelbrot),
            "burningship" | "ship" => Ok(Fractal::BurningShip),
            _ => Err(MandelError::InvalidArgument(format!(
                "unknown fractal '{}', expected one of {}",
                s,
                FRACTAL_NAMES.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_never_iterates() {
        for c in &[
            Complex::new(0.0, 0.0),
            Complex::new(3.0, 0.0),
            Complex::new(-0.5, 0.5),
            Complex::new(100.0, -100.0),
        ] {
            assert_eq!(evaluate(*c, 0), 0);
        }
    }

    #[test]
    fn origin_never_escapes() {
        for max_iter in &[1, 2, 10, 100, 5000] {
            assert_eq!(evaluate(Complex::new(0.0, 0.0), *max_iter), *max_iter);
        }
    }

    #[test]
    fn three_escapes_on_the_second_check() {
        // |0| passes at n=0, z becomes 3, caught at n=1.
        for max_iter in &[2, 3, 100, 10_000] {
            assert_eq!(evaluate(Complex::new(3.0, 0.0), *max_iter), 1);
        }
        // With a budget of one we never reach the second check.
        assert_eq!(evaluate(Complex::new(3.0, 0.0), 1), 1);
    }

    #[test]
    fn the_radius_itself_does_not_escape() {
        // c = -2 orbits 0, -2, 2, 2, ...; |z| == 2 is not > 2.
        assert_eq!(evaluate(Complex::new(-2.0, 0.0), 50), 50);
    }

    #[test]
    fn far_points_escape_quickly() {
        assert!(evaluate(Complex::new(2.0, 2.0), 100) <= 5);
        assert_eq!(evaluate(Complex::new(2.0, 2.0), 100), 1);
    }

    #[test]
    fn cardioid_points_are_bounded() {
        assert_eq!(evaluate(Complex::new(-0.5, 0.0), 100), 100);
        assert_eq!(evaluate(Complex::new(0.25, 0.0), 1000), 1000);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let c = Complex::new(-0.7453, 0.1127);
        let first = evaluate(c, 500);
        for _ in 0..10 {
            assert_eq!(evaluate(c, 500), first);
        }
    }

    #[test]
    fn results_stay_inside_the_budget() {
        let mut re = -2.5;
        while re < 1.5 {
            let mut im = -1.5;
            while im < 1.5 {
                assert!(evaluate(Complex::new(re, im), 64) <= 64);
                im += 0.1;
            }
            re += 0.1;
        }
    }

    #[test]
    fn largest_radius_still_detects_escape() {
        // 3 + 0i passes 1e100 on its ninth check; radius² must not overflow.
        let n = evaluate_with_radius(Complex::new(3.0, 0.0), 50, MAX_ESCAPE_RADIUS);
        assert!(n < 50, "c=3 reported bounded");
        assert_eq!(n, 9);
    }

    #[test]
    fn burning_ship_agrees_on_the_easy_points() {
        let ship = Fractal::BurningShip;
        assert_eq!(ship.escape_time(Complex::new(0.0, 0.0), 100, 2.0), 100);
        assert_eq!(ship.escape_time(Complex::new(3.0, 0.0), 100, 2.0), 1);
        assert_eq!(ship.escape_time(Complex::new(-0.5, 0.0), 100, 2.0), 100);
        assert_eq!(ship.escape_time(Complex::new(0.0, 0.0), 0, 2.0), 0);
    }

    #[test]
    fn burning_ship_is_not_mirror_symmetric() {
        let ship = Fractal::BurningShip;
        // The Mandelbrot set is symmetric about the real axis; the ship is not.
        assert_eq!(evaluate(Complex::new(0.3, 0.5), 100), 100);
        assert_eq!(evaluate(Complex::new(0.3, -0.5), 100), 100);
        assert_eq!(ship.escape_time(Complex::new(0.3, 0.5), 100, 2.0), 8);
        assert_eq!(ship.escape_time(Complex::new(0.3, -0.5), 100, 2.0), 100);
        assert_eq!(ship.escape_time(Complex::new(-0.5, 0.5), 100, 2.0), 4);
    }

    #[test]
    fn mandelbrot_fractal_is_evaluate() {
        let c = Complex::new(-0.7453, 0.1127);
        assert_eq!(Fractal::Mandelbrot.escape_time(c, 300, 2.0), evaluate(c, 300));
    }

    #[test]
    fn fractal_names_round_trip() {
        for name in Fractal::names() {
            let fractal: Fractal = name.parse().unwrap();
            assert_eq!(fractal.to_string(), *name);
        }
        assert_eq!("burning-ship".parse::<Fractal>().unwrap(), Fractal::BurningShip);
        assert!("julia".parse::<Fractal>().is_err());
    }

    #[test]
    fn larger_radius_takes_longer() {
        let c = Complex::new(0.5, 0.5);
        assert!(evaluate_with_radius(c, 100, 10.0) >= evaluate(c, 100));
    }
}
