//! Noise field configuration.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;

use crate::TerrainError;
use crate::seed::OCTAVE_OFFSET_RANGE;

/// Largest absolute coordinate the basis primitives are sampled at.
///
/// The lattice lookup converts coordinates to `isize`; far beyond this the
/// conversion fails and the sample has no usable precision left anyway.
pub const MAX_SAMPLE_COORDINATE: f64 = 2_147_483_648.0;

/// Continuous 2D noise primitive sampled once per octave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NoiseBasis {
    /// Gradient noise on a square lattice.
    #[default]
    Perlin,
    /// Gradient noise on a simplex lattice; fewer directional artifacts.
    Simplex,
    /// Interpolated lattice values; blockier texture.
    Value,
}

impl NoiseBasis {
    /// Lowercase name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Perlin => "perlin",
            Self::Simplex => "simplex",
            Self::Value => "value",
        }
    }
}

impl fmt::Display for NoiseBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseBasis {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perlin" => Ok(Self::Perlin),
            "simplex" => Ok(Self::Simplex),
            "value" => Ok(Self::Value),
            other => Err(TerrainError::invalid_config(format!(
                "unknown noise basis '{other}' (expected perlin, simplex or value)"
            ))),
        }
    }
}

/// Parameters for one fractal noise field.
///
/// Construct once per run and hand it to
/// [`NoiseFieldGenerator::generate`](crate::NoiseFieldGenerator::generate).
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseConfig {
    /// Field width in cells. Must be at least 1.
    pub width: u32,
    /// Field height in cells. Must be at least 1.
    pub height: u32,
    /// Seed for the per-octave offsets and the basis permutation table.
    pub seed: i64,
    /// Size of one noise unit in grid cells. Must be positive.
    pub scale: f64,
    /// Number of summed layers. Zero produces a flat field.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves, in `[0, 1]`.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves, at least 1.
    pub lacunarity: f64,
    /// Pan applied to every sample coordinate, in noise units.
    pub offset: DVec2,
    /// Noise primitive.
    pub basis: NoiseBasis,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            seed: 0,
            scale: 25.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: DVec2::ZERO,
            basis: NoiseBasis::Perlin,
        }
    }
}

impl NoiseConfig {
    /// A default config with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Number of cells the field will hold.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Worst-case absolute coordinate passed to the basis over all cells and octaves.
    ///
    /// Zero when there are no octaves to sample.
    pub fn max_sample_coordinate(&self) -> f64 {
        if self.octaves == 0 {
            return 0.0;
        }
        let half_extent = self.width.max(self.height) as f64 / 2.0;
        let top_frequency = self.lacunarity.powf(f64::from(self.octaves - 1));
        let pan = self.offset.abs().max_element();
        half_extent / self.scale * top_frequency + pan + OCTAVE_OFFSET_RANGE
    }

    /// Checks every field the generator depends on.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidConfig`] for zero dimensions, a
    /// non-positive scale, lacunarity below 1, persistence outside `[0, 1]`,
    /// any non-finite real, or a combination of extent, scale, lacunarity,
    /// octaves and offset that would sample beyond [`MAX_SAMPLE_COORDINATE`].
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width < 1 || self.height < 1 {
            return Err(TerrainError::invalid_config(format!(
                "dimensions must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TerrainError::invalid_config(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if !self.lacunarity.is_finite() || self.lacunarity < 1.0 {
            return Err(TerrainError::invalid_config(format!(
                "lacunarity must be at least 1, got {}",
                self.lacunarity
            )));
        }
        if !(0.0..=1.0).contains(&self.persistence) {
            return Err(TerrainError::invalid_config(format!(
                "persistence must be in [0, 1], got {}",
                self.persistence
            )));
        }
        if !self.offset.is_finite() {
            return Err(TerrainError::invalid_config(format!(
                "offset must be finite, got {}",
                self.offset
            )));
        }
        let reach = self.max_sample_coordinate();
        if reach > MAX_SAMPLE_COORDINATE {
            return Err(TerrainError::invalid_config(format!(
                "sample coordinates reach {reach:e}, beyond {MAX_SAMPLE_COORDINATE:e}"
            )));
        }
        Ok(())
    }
}
