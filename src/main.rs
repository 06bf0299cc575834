//! # Stitchwork CLI
//!
//! Command-line interface for turning images into embroidery patterns.
//!
//! ## Usage
//!
//! ```bash
//! # List view modes, directions and thread patterns
//! stitchwork list
//!
//! # Render with defaults to pattern.png
//! stitchwork render photo.jpg
//!
//! # Embroidery view, radial waves, plus stitch file and color list
//! stitchwork render photo.jpg --view-mode embroidery --direction radial \
//!     --pattern wave --dst --colors
//!
//! # Load settings from JSON, override one field, reproducible jitter
//! stitchwork render photo.jpg --settings look.json --spacing 1.5 --seed 7
//! ```

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

use stitchwork::{
    RenderSettings, Session, StitchError, palette,
    settings::{SettingUpdate, StitchDirection, ThreadPattern, ViewMode},
    stitch,
};

/// Stitchwork - Embroidery pattern generator
#[derive(Parser, Debug)]
#[command(name = "stitchwork")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render an image into an embroidery pattern
    Render {
        /// Source image (PNG, JPEG, ...)
        input: PathBuf,

        /// Output PNG of the rendering
        #[arg(long, value_name = "FILE", default_value = "pattern.png")]
        png: PathBuf,

        /// Also write a stitch file
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = stitch::DEFAULT_FILENAME)]
        dst: Option<PathBuf>,

        /// Also write the numbered thread color list
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = palette::COLOR_LIST_FILENAME)]
        colors: Option<PathBuf>,

        /// JSON settings file (camelCase keys)
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,

        /// View mode: normal, stitches, symbols, embroidery
        #[arg(long)]
        view_mode: Option<ViewMode>,

        /// Stitch direction: horizontal, vertical, diagonal, radial
        #[arg(long)]
        direction: Option<StitchDirection>,

        /// Thread pattern: straight, wave, zigzag, spiral, crosshatch
        #[arg(long)]
        pattern: Option<ThreadPattern>,

        /// Thread spacing in [0.5, 10] (lattice pitch = spacing * 10 px)
        #[arg(long)]
        spacing: Option<f32>,

        /// Wave/zigzag/spiral amplitude in pixels
        #[arg(long)]
        amplitude: Option<f32>,

        /// Wave cycles per thread, spiral turns
        #[arg(long)]
        frequency: Option<f32>,

        /// Thread intensity (display only)
        #[arg(long)]
        intensity: Option<f32>,

        /// Grid size for embroidery cell sizing
        #[arg(long)]
        grid_size: Option<u32>,

        /// Seed the stroke jitter for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List accepted setting values
    List,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), StitchError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            print_names("View modes", ViewMode::ALL);
            print_names("Stitch directions", StitchDirection::ALL);
            print_names("Thread patterns", ThreadPattern::ALL);
        }
        Commands::Render {
            input,
            png,
            dst,
            colors,
            settings,
            view_mode,
            direction,
            pattern,
            spacing,
            amplitude,
            frequency,
            intensity,
            grid_size,
            seed,
        } => {
            let base = match settings {
                Some(path) => RenderSettings::load(&path)?,
                None => RenderSettings::default(),
            };

            let mut session = Session::open(&input)?.with_settings(base)?;

            let overrides = [
                view_mode.map(SettingUpdate::ViewMode),
                direction.map(SettingUpdate::StitchDirection),
                pattern.map(SettingUpdate::ThreadPattern),
                spacing.map(SettingUpdate::ThreadSpacing),
                amplitude.map(SettingUpdate::WaveAmplitude),
                frequency.map(SettingUpdate::WaveFrequency),
                intensity.map(SettingUpdate::ThreadIntensity),
            ];
            for update in overrides.into_iter().flatten() {
                session.update(update)?;
            }
            if let Some(grid_size) = grid_size {
                session.set_grid_size(grid_size)?;
            }

            log::info!(
                "Rendering {} ({}x{})",
                input.display(),
                session.source().width(),
                session.source().height()
            );

            let rendering = match seed {
                Some(seed) => session.recompute(&mut StdRng::seed_from_u64(seed))?,
                None => session.recompute(&mut rand::rng())?,
            };
            println!(
                "Rendered {} strokes, {} colors",
                rendering.cell_stats.strokes + rendering.field_stats.strokes,
                rendering.palette.len()
            );

            session.export_png(&png)?;
            println!("Saved to {}", png.display());

            if let Some(path) = dst {
                if path.extension().and_then(|e| e.to_str()) != Some(stitch::commands::FILE_EXTENSION) {
                    log::warn!(
                        "{} does not use the .{} extension",
                        path.display(),
                        stitch::commands::FILE_EXTENSION
                    );
                }
                write_export(&path, &session.export_stitch_file()?)?;
                println!("Saved stitch file to {}", path.display());
            }

            if let Some(path) = colors {
                write_export(&path, session.color_list()?.as_bytes())?;
                println!("Saved color list to {}", path.display());
            }
        }
    }

    Ok(())
}

fn write_export(path: &Path, bytes: &[u8]) -> Result<(), StitchError> {
    std::fs::write(path, bytes)
        .map_err(|e| StitchError::Export(format!("Failed to write {}: {}", path.display(), e)))
}

fn print_names<T: std::fmt::Display>(title: &str, values: &[T]) {
    println!("{}:", title);
    for v in values {
        println!("  {}", v);
    }
}
