//! Multi-octave fractal noise field generation.
//!
//! Sums octaves of a coherent noise basis per cell, then min-max normalizes the
//! whole field into `[0, 1]` so classification thresholds do not depend on
//! octave count or persistence.

use std::fmt;
use std::time::Instant;

use glam::DVec2;
use noise::{NoiseFn, Perlin, Simplex, Value};
use rayon::prelude::*;

use crate::TerrainError;
use crate::grid::{Grid, NoiseField};
use crate::noise_config::{NoiseBasis, NoiseConfig};
use crate::seed::{basis_seed, octave_offsets};

/// Value every cell takes when the raw field is flat.
pub const FLAT_FIELD_VALUE: f64 = 0.5;

/// Seeded basis primitive, dispatched once per sample.
#[derive(Clone)]
enum Basis {
    Perlin(Perlin),
    Simplex(Simplex),
    Value(Value),
}

impl Basis {
    fn new(kind: NoiseBasis, seed: u32) -> Self {
        match kind {
            NoiseBasis::Perlin => Self::Perlin(Perlin::new(seed)),
            NoiseBasis::Simplex => Self::Simplex(Simplex::new(seed)),
            NoiseBasis::Value => Self::Value(Value::new(seed)),
        }
    }

    fn kind(&self) -> NoiseBasis {
        match self {
            Self::Perlin(_) => NoiseBasis::Perlin,
            Self::Simplex(_) => NoiseBasis::Simplex,
            Self::Value(_) => NoiseBasis::Value,
        }
    }

    #[inline]
    fn get(&self, point: DVec2) -> f64 {
        let p = [point.x, point.y];
        match self {
            Self::Perlin(n) => n.get(p),
            Self::Simplex(n) => n.get(p),
            Self::Value(n) => n.get(p),
        }
    }
}

impl fmt::Debug for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Basis").field(&self.kind()).finish()
    }
}

/// Generates normalized fractal noise fields.
///
/// Holds a validated [`NoiseConfig`] together with the seeded basis and the
/// per-octave offsets derived from it, so repeated calls to
/// [`field`](Self::field) reuse them. For one-shot use call
/// [`generate`](Self::generate).
#[derive(Clone, Debug)]
pub struct NoiseFieldGenerator {
    config: NoiseConfig,
    basis: Basis,
    octave_offsets: Vec<DVec2>,
}

impl NoiseFieldGenerator {
    /// Validate `config` and prepare the basis and octave offsets.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidConfig`] if the config is rejected by
    /// [`NoiseConfig::validate`].
    pub fn new(config: NoiseConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        let basis = Basis::new(config.basis, basis_seed(config.seed));
        let octave_offsets = octave_offsets(config.seed, config.octaves);
        Ok(Self {
            config,
            basis,
            octave_offsets,
        })
    }

    /// Generate the normalized field for `config`.
    ///
    /// Identical configs produce bit-identical fields, independent of the
    /// number of worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidConfig`] before any sampling if the
    /// config is invalid.
    pub fn generate(config: &NoiseConfig) -> Result<NoiseField, TerrainError> {
        Ok(Self::new(config.clone())?.field())
    }

    /// Return a reference to the config this generator was built from.
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Raw (unnormalized) fractal sum at cell `(x, y)`.
    ///
    /// The range depends on octaves, persistence and the basis; it is roughly
    /// `[-max_amplitude, +max_amplitude]`.
    pub fn sample(&self, x: u32, y: u32) -> f64 {
        let half_width = self.config.width as f64 / 2.0;
        let half_height = self.config.height as f64 / 2.0;
        let cell = DVec2::new(
            (x as f64 - half_width) / self.config.scale,
            (y as f64 - half_height) / self.config.scale,
        );

        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;

        for octave_offset in &self.octave_offsets {
            let point = cell * frequency + self.config.offset + *octave_offset;
            total += self.basis.get(point) * amplitude;

            amplitude *= self.config.persistence;
            frequency *= self.config.lacunarity;
        }

        total
    }

    /// Geometric sum of all octave amplitudes.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..self.config.octaves {
            sum += amp;
            amp *= self.config.persistence;
        }
        sum
    }

    /// Sample every cell and normalize the result into `[0, 1]`.
    ///
    /// Rows are accumulated in parallel, each reporting its own extrema; the
    /// per-row extrema are reduced before the normalize pass starts.
    pub fn field(&self) -> NoiseField {
        let width = self.config.width;
        let height = self.config.height;
        let _span = tracing::debug_span!(
            "noise_field",
            width,
            height,
            seed = self.config.seed,
            octaves = self.config.octaves,
            basis = %self.config.basis,
        )
        .entered();
        let start = Instant::now();

        let mut cells = vec![0.0; self.config.cell_count()];
        let (min, max) = cells
            .par_chunks_mut(width as usize)
            .enumerate()
            .map(|(y, row)| {
                let mut lo = f64::INFINITY;
                let mut hi = f64::NEG_INFINITY;
                for (x, cell) in row.iter_mut().enumerate() {
                    let value = self.sample(x as u32, y as u32);
                    lo = lo.min(value);
                    hi = hi.max(value);
                    *cell = value;
                }
                (lo, hi)
            })
            .reduce(
                || (f64::INFINITY, f64::NEG_INFINITY),
                |a, b| (a.0.min(b.0), a.1.max(b.1)),
            );

        normalize(&mut cells, min, max);

        tracing::debug!(
            raw_min = min,
            raw_max = max,
            elapsed_us = start.elapsed().as_micros() as u64,
            "noise field generated"
        );

        Grid::from_cells(width, height, cells)
    }
}

/// Linearly remap `values` from `[min, max]` into `[0, 1]`.
///
/// A flat range maps every value to [`FLAT_FIELD_VALUE`].
fn normalize(values: &mut [f64], min: f64, max: f64) {
    let range = max - min;
    if range <= 0.0 {
        values.par_iter_mut().for_each(|v| *v = FLAT_FIELD_VALUE);
        return;
    }
    values.par_iter_mut().for_each(|v| *v = (*v - min) / range);
}
