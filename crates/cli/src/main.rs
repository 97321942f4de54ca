#![deny(unsafe_code)]
//! CLI binary for palette-gen.
//!
//! Subcommands:
//! - `palette` — print the first N colors of a seed's palette
//! - `color` — print a single palette color by index
//! - `distance` — score the similarity of two colors
//! - `html` — write an HTML swatch document (generation and similarity order)

mod error;
mod html;

use clap::{Parser, Subcommand};
use error::CliError;
use palette_gen_core::{
    color_distance, sort_by_similarity, Color, Hsv, PaletteConfig, PaletteGenerator, PaletteIndex,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SEED: &str = "#EACE8C";

#[derive(Parser)]
#[command(name = "palette-gen", about = "Harmonic color palette generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Palette configuration as a JSON file (hue_steps, saturation, value).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the first N colors of the palette.
    Palette {
        /// Seed color as a hex code ("#RRGGBB" or "RRGGBB").
        #[arg(short, long, default_value = DEFAULT_SEED)]
        seed: String,

        /// Number of colors (defaults to six full rounds of hue steps).
        #[arg(short, long)]
        length: Option<usize>,

        /// Sort the colors by similarity to the seed.
        #[arg(long)]
        sorted: bool,
    },
    /// Print a single palette color.
    Color {
        /// Seed color as a hex code.
        #[arg(short, long, default_value = DEFAULT_SEED)]
        seed: String,

        /// Palette index (0 is the seed itself).
        #[arg(short, long, allow_negative_numbers = true)]
        index: i64,
    },
    /// Score color A relative to color B (smaller is closer; order matters).
    Distance {
        /// First color as a hex code.
        a: String,

        /// Second color as a hex code.
        b: String,
    },
    /// Write an HTML swatch document for the palette.
    Html {
        /// Seed color as a hex code.
        #[arg(short, long, default_value = DEFAULT_SEED)]
        seed: String,

        /// Number of colors (defaults to six full rounds of hue steps).
        #[arg(short, long)]
        length: Option<usize>,

        /// Output file path. Writes to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// JSON view of one palette entry.
#[derive(Serialize)]
struct Swatch {
    index: u64,
    hex: Color,
    rgb: [u8; 3],
    hsv: Hsv,
    distance: f64,
}

impl Swatch {
    fn new(index: u64, color: Color, seed: &Color) -> Self {
        Self {
            index,
            hex: color,
            rgb: color.rgb_bytes(),
            hsv: color.hsv(),
            distance: color_distance(&color, seed),
        }
    }
}

fn load_generator(path: Option<&Path>) -> Result<PaletteGenerator, CliError> {
    let Some(path) = path else {
        return Ok(PaletteGenerator::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read config {}: {e}", path.display())))?;
    let config = PaletteConfig::from_json_str(&json)?;
    debug!(path = %path.display(), "loaded palette config");
    Ok(PaletteGenerator::new(config)?)
}

/// Maps each color of `ordered` back to its position in `palette`.
///
/// `ordered` is a permutation of `palette`; repeated colors claim positions
/// in order of appearance.
fn generation_indices(palette: &[Color], ordered: &[Color]) -> Vec<usize> {
    let mut taken = vec![false; palette.len()];
    ordered
        .iter()
        .map(|color| {
            let i = (0..palette.len())
                .find(|&i| !taken[i] && palette[i] == *color)
                .unwrap_or_default();
            taken[i] = true;
            i
        })
        .collect()
}

fn default_length(generator: &PaletteGenerator) -> usize {
    6 * generator.config().hue_steps as usize
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let generator = load_generator(cli.config.as_deref())?;

    match cli.command {
        Command::Palette {
            seed,
            length,
            sorted,
        } => {
            let seed = Color::from_hex(&seed)?;
            let length = length.unwrap_or_else(|| default_length(&generator));
            let palette = generator.get_palette(&seed, length);
            let mut colors = palette.clone();
            if sorted {
                sort_by_similarity(&mut colors, &seed);
            }
            let swatches: Vec<Swatch> = generation_indices(&palette, &colors)
                .into_iter()
                .zip(colors)
                .map(|(i, c)| Swatch::new(i as u64, c, &seed))
                .collect();
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&swatches)?)?;
            } else {
                for s in &swatches {
                    writeln!(out, "{:>4}  {}", s.index, s.hex)?;
                }
            }
        }
        Command::Color { seed, index } => {
            let seed = Color::from_hex(&seed)?;
            let index = PaletteIndex::try_from(index)?;
            let color = generator.get_color(&seed, index.get());
            if cli.json {
                let swatch = Swatch::new(index.get(), color, &seed);
                writeln!(out, "{}", serde_json::to_string_pretty(&swatch)?)?;
            } else {
                writeln!(out, "{color}")?;
            }
        }
        Command::Distance { a, b } => {
            let a = Color::from_hex(&a)?;
            let b = Color::from_hex(&b)?;
            let distance = color_distance(&a, &b);
            if cli.json {
                let info = serde_json::json!({ "a": a, "b": b, "distance": distance });
                writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
            } else {
                writeln!(out, "{distance:.6}")?;
            }
        }
        Command::Html {
            seed,
            length,
            output,
        } => {
            let seed = Color::from_hex(&seed)?;
            let length = length.unwrap_or_else(|| default_length(&generator));
            let palette = generator.get_palette(&seed, length);
            match output {
                Some(path) => {
                    let path = html::write_html_file(&path, &seed, &palette).map_err(|e| {
                        CliError::Io(format!("cannot write {}: {e}", path.display()))
                    })?;
                    info!(path = %path.display(), colors = palette.len(), "wrote html palette");
                    if cli.json {
                        let info = serde_json::json!({
                            "seed": seed,
                            "length": palette.len(),
                            "output": path.display().to_string(),
                        });
                        writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
                    }
                }
                None => html::write_html(out, &seed, &palette)?,
            }
        }
    }

    Ok(())
}

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json_mode = cli.json;
    let stdout = std::io::stdout();
    if let Err(e) = run(cli, &mut stdout.lock()) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
