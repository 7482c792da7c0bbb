// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate log;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use log::info;
use num::Complex;
use std::str::FromStr;

use mandelbrot::config::{MAX_DIMENSION, MAX_ITERATIONS};
use mandelbrot::output::{self, OutputFormat};
use mandelbrot::{
    Colormap, Fractal, MandelError, RenderConfig, Renderer, Result, Viewport, MAX_ESCAPE_RADIUS,
};

/// Given a string and a separator, returns the two values
/// separated by the separator.
fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> std::result::Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const COLORMAP: &str = "colormap";
const FRACTAL: &str = "fractal";
const RADIUS: &str = "radius";
const NO_LEGEND: &str = "no-legend";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelbrot")
        .version("0.1.0")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (.png, .ppm or .pnm)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| match parse_pair::<usize>(&s, 'x') {
                    Some((w, h)) if w <= MAX_DIMENSION && h <= MAX_DIMENSION => Ok(()),
                    Some(_) => Err(format!("Image sides must be at most {}", MAX_DIMENSION)),
                    None => Err("Could not parse output image size".to_string()),
                })
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,-1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner (x_min,y_min) of the viewport"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1,1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner (x_max,y_max) of the viewport"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        MAX_ITERATIONS,
                        "Could not parse iteration count",
                        &format!("Iteration count must be between 0 and {}", MAX_ITERATIONS),
                    )
                })
                .help("Maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(COLORMAP)
                .required(false)
                .long(COLORMAP)
                .short("c")
                .takes_value(true)
                .default_value("hot")
                .validator(|s| Colormap::from_str(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Color ramp: hot, red or gray"),
        )
        .arg(
            Arg::with_name(FRACTAL)
                .required(false)
                .long(FRACTAL)
                .short("f")
                .takes_value(true)
                .default_value("mandelbrot")
                .validator(|s| Fractal::from_str(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Recurrence to render: mandelbrot or burningship"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| {
                    validate_range(
                        &s,
                        2.0,
                        MAX_ESCAPE_RADIUS,
                        "Could not parse escape radius",
                        &format!("Escape radius must be between 2 and {:e}", MAX_ESCAPE_RADIUS),
                    )
                })
                .help("Escape radius"),
        )
        .arg(
            Arg::with_name(NO_LEGEND)
                .long(NO_LEGEND)
                .help("Do not draw the intensity legend"),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    let raw = matches.value_of(name).unwrap_or_default();
    T::from_str(raw).map_err(|_| MandelError::InvalidArgument(format!("{}: '{}'", name, raw)))
}

fn corner(matches: &ArgMatches, name: &str) -> Result<Complex<f64>> {
    let raw = matches.value_of(name).unwrap_or_default();
    parse_complex(raw).ok_or_else(|| MandelError::InvalidArgument(format!("{}: '{}'", name, raw)))
}

fn config_from(matches: &ArgMatches) -> Result<RenderConfig> {
    let raw_size = matches.value_of(SIZE).unwrap_or_default();
    let (width, height) = parse_pair::<usize>(raw_size, 'x')
        .ok_or_else(|| MandelError::InvalidArgument(format!("{}: '{}'", SIZE, raw_size)))?;
    let viewport = Viewport::from_corners(corner(matches, LEFTLOWER)?, corner(matches, RIGHTUPPER)?)?;

    let config = RenderConfig {
        width,
        height,
        viewport,
        fractal: value(matches, FRACTAL)?,
        max_iter: value(matches, ITERATIONS)?,
        escape_radius: value(matches, RADIUS)?,
        colormap: value(matches, COLORMAP)?,
        threads: value(matches, THREADS)?,
        legend: !matches.is_present(NO_LEGEND),
    };
    config.validate()?;
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let outfile = matches.value_of(OUTPUT).unwrap_or_default();
    OutputFormat::from_path(outfile)?;
    let config = config_from(matches)?;
    info!("{:?}", config);

    let grid = Renderer::new(config.clone())?.render()?;
    let raster = output::compose(&grid, config.colormap, config.legend);
    output::write_image(outfile, &raster)?;
    info!("wrote {}x{} image to {}", raster.width, raster.height, outfile);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
