use std::{sync::Arc, time::Instant};

use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches};
use log::{error, info, LevelFilter};
use whitted::{
    camera::Camera,
    material::Color,
    output::PngWriter,
    tracer::SimpleRayTracer,
};

use crate::config::RenderConfig;

mod config;
mod logger;
mod scenes;

fn main() {
    let matches = App::new("Whitted Renderer")
        .version("1.0")
        .about("Renders one of the built-in demo scenes to a PNG file")
        .arg(
            Arg::with_name("SCENE")
                .help("The scene to render")
                .possible_values(scenes::NAMES)
                .default_value("two-spheres")
                .index(1),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .value_name("FILE")
                .help("A TOML file with render settings"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .value_name("FILE")
                .help("The output file"),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("PIXELS")
                .help("The image width"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("PIXELS")
                .help("The image height"),
        )
        .arg(
            Arg::with_name("threads")
                .long("threads")
                .short("t")
                .value_name("N")
                .help("Render workers; 0 picks a count from the available cores"),
        )
        .arg(
            Arg::with_name("grid")
                .long("grid")
                .value_name("PIXELS")
                .help("Overlay a white grid with this spacing"),
        )
        .arg(
            Arg::with_name("log")
                .long("log")
                .short("l")
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .default_value("info")
                .help("The log level"),
        )
        .get_matches();

    let level = matches
        .value_of("log")
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info);
    logger::init_logger(level);

    if let Err(e) = run(&matches) {
        error!("Failed to render: {:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.value_of("config") {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };

    // the command line wins over the file
    if let Some(output) = matches.value_of("output") {
        config.output = output.into();
    }
    if let Some(width) = matches.value_of("width") {
        config.width = width.parse().context("invalid width")?;
    }
    if let Some(height) = matches.value_of("height") {
        config.height = height.parse().context("invalid height")?;
    }
    if let Some(threads) = matches.value_of("threads") {
        config.threads = threads.parse().context("invalid thread count")?;
    }
    if let Some(grid) = matches.value_of("grid") {
        config.grid = grid.parse().context("invalid grid spacing")?;
    }

    let now = Instant::now();
    let name = matches.value_of("SCENE").unwrap_or("two-spheres");
    let demo = scenes::build(name)?;
    info!("Scene {:?} constructed in {:.3}s", demo.scene.name, now.elapsed().as_secs_f64());

    let view = demo.view;
    let tracer = SimpleRayTracer::new(Arc::new(demo.scene)).with_options(config.tracer);
    let mut camera = Camera::builder()
        .location(view.location)
        .direction(view.to, view.up)
        .vp_size(view.size, view.size)
        .vp_distance(view.distance)
        .sampling(config.sampling)
        .threads(config.threads)
        .image_writer(PngWriter::new(&config.output, config.width, config.height))
        .ray_tracer(Box::new(tracer))
        .build()?;

    camera.render_image()?;
    if config.grid > 0 {
        camera.print_grid(config.grid, Color::white());
    }
    camera.write_to_image()?;

    info!(
        "Wrote {} in {:.3}s",
        camera.image_writer().path().display(),
        now.elapsed().as_secs_f64()
    );
    Ok(())
}
