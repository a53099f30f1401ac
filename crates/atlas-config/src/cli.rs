//! Command-line argument parsing for the atlas map generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Atlas command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "atlas", about = "Seeded fractal-noise terrain classifier")]
pub struct CliArgs {
    /// Map width in cells.
    #[arg(long)]
    pub width: Option<u32>,

    /// Map height in cells.
    #[arg(long)]
    pub height: Option<u32>,

    /// Generation seed.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Size of one noise unit in cells.
    #[arg(long)]
    pub scale: Option<f64>,

    /// Number of noise octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Amplitude falloff per octave.
    #[arg(long)]
    pub persistence: Option<f64>,

    /// Frequency growth per octave.
    #[arg(long)]
    pub lacunarity: Option<f64>,

    /// Horizontal pan in noise units.
    #[arg(long, allow_negative_numbers = true)]
    pub offset_x: Option<f64>,

    /// Vertical pan in noise units.
    #[arg(long, allow_negative_numbers = true)]
    pub offset_y: Option<f64>,

    /// Noise basis (perlin, simplex, value).
    #[arg(long)]
    pub basis: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Width and height also apply to the secondary field so both stay the same size.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let primary = &mut self.map.primary;
        if let Some(w) = args.width {
            primary.width = w;
        }
        if let Some(h) = args.height {
            primary.height = h;
        }
        if let Some(seed) = args.seed {
            primary.seed = seed;
        }
        if let Some(scale) = args.scale {
            primary.scale = scale;
        }
        if let Some(octaves) = args.octaves {
            primary.octaves = octaves;
        }
        if let Some(p) = args.persistence {
            primary.persistence = p;
        }
        if let Some(l) = args.lacunarity {
            primary.lacunarity = l;
        }
        if let Some(x) = args.offset_x {
            primary.offset.0 = x;
        }
        if let Some(y) = args.offset_y {
            primary.offset.1 = y;
        }
        if let Some(ref basis) = args.basis {
            primary.basis = basis.clone();
        }
        if let Some(ref mut secondary) = self.map.secondary {
            if let Some(w) = args.width {
                secondary.width = w;
            }
            if let Some(h) = args.height {
                secondary.height = h;
            }
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
