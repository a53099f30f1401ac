//! Procedural terrain classification: seeded fractal noise fields, ordered
//! threshold tables, and secondary-field-gated overlays.
//!
//! The core is a pure function from configuration to a classified grid:
//! [`NoiseFieldGenerator`] produces normalized fields, [`TerrainClassifier`]
//! maps them through a [`ClassificationTable`] (and optional [`OverlayRule`])
//! into a [`ClassifiedGrid`].

mod error;
mod generator;
mod grid;
mod noise_config;
mod pipeline;

pub mod classify;
pub mod render;
pub mod seed;


pub use classify::{
    CategoryDef, CategoryId, CategoryRegistry, CategoryRegistryError, ClassificationRule,
    ClassificationTable, OverlayRule, TerrainClassifier,
};
pub use error::TerrainError;
pub use generator::{FLAT_FIELD_VALUE, NoiseFieldGenerator};
pub use grid::{ClassifiedGrid, Grid, NoiseField};
pub use noise_config::{MAX_SAMPLE_COORDINATE, NoiseBasis, NoiseConfig};
pub use pipeline::{TerrainMap, generate_terrain};
