//! Blockterm Demo
//!
//! Draws a few overlapping rectangles into a raster, blits it onto a
//! half-block grid and writes the rendered frame to stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use blockterm::ansi::sgr::{GREEN, RED};
use blockterm::ansi::{Quantizer, Sgr};
use blockterm::config::Config;
use blockterm::core::{CellDefaults, Grid, Snapshot, Style};
use blockterm::halfblock::blit;
use blockterm::image::ImageData;
use blockterm::renderer::Renderer;
use blockterm::text::{print, Pen};

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const RECTANGLES: [(usize, usize, [u8; 4]); 5] = [
    (2, 1, [0, 0, 255, 255]),
    (4, 2, [255, 0, 0, 255]),
    (6, 3, [0, 128, 0, 255]),
    (8, 4, [238, 130, 238, 255]),
    (10, 5, [255, 255, 0, 255]),
];

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut rows: Option<usize> = None;
    let mut cols: Option<usize> = None;
    let mut config_file: Option<String> = None;
    let mut json = false;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--rows" => {
                i += 1;
                if i < args.len() {
                    rows = args[i].parse().ok();
                }
            },
            "-c" | "--cols" => {
                i += 1;
                if i < args.len() {
                    cols = args[i].parse().ok();
                }
            },
            "-f" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            },
            "-j" | "--json" => {
                json = true;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            other => {
                eprintln!("Unknown argument '{}'", other);
                print_help();
                return ExitCode::FAILURE;
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let mut config = match &config_file {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => Config::default(),
    };
    if let Some(rows) = rows {
        config.rows = rows;
    }
    if let Some(cols) = cols {
        config.columns = cols;
    }

    match run(&config, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(config: &Config, json: bool) -> blockterm::Result<()> {
    let sgr = Sgr::new();
    let black = sgr.color8().cube6[0][0][0];
    let defaults = CellDefaults {
        glyph: config.glyph()?,
        fore: black.fore,
        back: black.back,
    };
    let mut grid = Grid::new(config.dimensions(), &defaults)?;

    let mut image = ImageData::blank(20, 10)?;
    for (x, y, rgba) in RECTANGLES {
        image.fill_rect(x, y, 8, 4, rgba);
    }

    let quantizer = Quantizer::new(&sgr, config.color_mode);
    let written = blit(&image, &mut grid, config.origin, &quantizer)?;
    info!(written, mode = ?config.color_mode, "raster drawn");

    if grid.rows() > 0 && grid.columns() > 0 {
        let pen = Pen::new(sgr.color4().normal[GREEN])
            .with_fore(sgr.color4().normal[RED].fore)
            .with_style(Style::BOLD);
        let last_row = i64::try_from(grid.rows() - 1).unwrap_or(i64::MAX);
        print(&mut grid, last_row, 0, "blockterm", &pen)?;
    }

    let mut stdout = io::stdout().lock();
    if json {
        let snapshot = Snapshot::from_grid(&grid);
        writeln!(stdout, "{}", snapshot.to_json()?)?;
    } else {
        let frame = Renderer::new(&sgr).with_line_feed(true).render(&grid);
        stdout.write_all(&frame)?;
        stdout.write_all(sgr.reset().as_bytes())?;
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn print_help() {
    println!("Blockterm Demo");
    println!();
    println!("Usage: blockterm-demo [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -r, --rows <N>       Set terminal height (default: 24)");
    println!("  -c, --cols <N>       Set terminal width (default: 80)");
    println!("  -f, --config <PATH>  Load settings from a JSON file");
    println!("  -j, --json           Output a grid snapshot as JSON");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Log filter for stderr output (default: warn)");
}
