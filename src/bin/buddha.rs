// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use buddhagrid::{Error, Raster, RenderConfig, Renderer, Strategy};
use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::str::FromStr;

fn validate_positive(s: &str, isnotanumber_err: &str, isnotinrange_err: &str) -> Result<(), String> {
    match usize::from_str(s) {
        Ok(0) => Err(isnotinrange_err.to_string()),
        Ok(_) => Ok(()),
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const ITERATIONS: &str = "max-iterations";
const MODE: &str = "mode";
const WORKERS: &str = "workers";

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("buddha")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Buddhabrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("render.png")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .takes_value(true)
                .default_value("800")
                .validator(|s| validate_positive(&s, "Could not parse width", "Width must be positive"))
                .help("Width of output image"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .takes_value(true)
                .default_value("600")
                .validator(|s| validate_positive(&s, "Could not parse height", "Height must be positive"))
                .help("Height of output image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_positive(
                        &s,
                        "Could not parse iteration count",
                        "Iteration count must be positive",
                    )
                })
                .help("Maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(MODE)
                .long(MODE)
                .short("m")
                .takes_value(true)
                .default_value("sequential")
                .possible_values(&[
                    "sequential",
                    "per-pixel",
                    "per-row",
                    "worker-pool",
                    "seq",
                    "px",
                    "row",
                    "workers",
                ])
                .help("How to spread the pixels over threads"),
        )
        .arg(
            Arg::with_name(WORKERS)
                .long(WORKERS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_positive(&s, "Could not parse worker count", "Worker count must be positive")
                })
                .help("Number of threads in worker-pool mode"),
        )
}

fn args<'a>() -> ArgMatches<'a> {
    app().get_matches()
}

fn raw<'m>(matches: &'m ArgMatches, name: &str) -> Result<&'m str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| Error::InvalidConfig(format!("missing --{}", name)))
}

fn number(matches: &ArgMatches, name: &str) -> Result<usize, Error> {
    let s = raw(matches, name)?;
    usize::from_str(s).map_err(|e| Error::InvalidConfig(format!("--{} {}: {}", name, s, e)))
}

fn strategy(matches: &ArgMatches) -> Result<Strategy, Error> {
    raw(matches, MODE)?.parse()
}

fn config(matches: &ArgMatches) -> Result<RenderConfig, Error> {
    let strategy = strategy(matches)?;
    let workers = number(matches, WORKERS)?;
    if strategy == Strategy::WorkerPool && workers > num_cpus::get() {
        warn!("{} workers on {} cpus", workers, num_cpus::get());
    }
    RenderConfig::new(
        number(matches, ITERATIONS)?,
        number(matches, WIDTH)?,
        number(matches, HEIGHT)?,
        strategy,
        workers,
    )
}

fn write_image(outfile: &str, raster: &Raster) -> Result<(), Error> {
    let output_error = |cause| Error::Output {
        path: outfile.to_string(),
        cause,
    };
    let output = File::create(outfile).map_err(output_error)?;
    let encoder = PNGEncoder::new(BufWriter::new(output));
    let (width, height) = raster.dimensions();
    encoder
        .encode(raster, width, height, ColorType::RGBA(8))
        .map_err(output_error)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = config(matches)?;
    let outfile = matches.value_of(OUTPUT).unwrap_or("render.png");
    info!(
        "rendering {}x{}, {} iterations, {} mode",
        config.width(),
        config.height(),
        config.iterations(),
        config.strategy()
    );
    let raster = Renderer::new(config)?.render()?;
    write_image(outfile, &raster)?;
    info!("wrote {}", outfile);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
