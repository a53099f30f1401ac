//! End-to-end generation: configs in, classified grid out.

use crate::TerrainError;
use crate::classify::TerrainClassifier;
use crate::generator::NoiseFieldGenerator;
use crate::grid::{ClassifiedGrid, NoiseField};
use crate::noise_config::NoiseConfig;

/// Fields and grid produced by one [`generate_terrain`] run.
#[derive(Clone, Debug)]
pub struct TerrainMap<C> {
    /// Normalized primary (elevation) field.
    pub primary: NoiseField,
    /// Normalized secondary (gate) field, when one was configured.
    pub secondary: Option<NoiseField>,
    /// Category per cell.
    pub grid: ClassifiedGrid<C>,
}

/// Generate the primary field (and the secondary field, if configured) and
/// classify them.
///
/// Both configs are validated and their dimensions compared before any
/// sampling starts.
///
/// # Errors
///
/// - [`TerrainError::InvalidConfig`] if either config is invalid.
/// - [`TerrainError::DimensionMismatch`] if the configs disagree on size.
pub fn generate_terrain<C>(
    primary: &NoiseConfig,
    secondary: Option<&NoiseConfig>,
    classifier: &TerrainClassifier<C>,
) -> Result<TerrainMap<C>, TerrainError>
where
    C: Copy + Send + Sync,
{
    let primary_gen = NoiseFieldGenerator::new(primary.clone())?;
    let secondary_gen = match secondary {
        Some(config) => {
            let generator = NoiseFieldGenerator::new(config.clone())?;
            if (config.width, config.height) != (primary.width, primary.height) {
                return Err(TerrainError::DimensionMismatch {
                    primary: (primary.width, primary.height),
                    secondary: (config.width, config.height),
                });
            }
            Some(generator)
        }
        None => None,
    };

    let _span = tracing::info_span!(
        "generate_terrain",
        width = primary.width,
        height = primary.height,
        seed = primary.seed,
    )
    .entered();

    let primary_field = primary_gen.field();
    let secondary_field = secondary_gen.map(|generator| generator.field());
    let grid = classifier.classify(&primary_field, secondary_field.as_ref())?;

    tracing::info!(cells = grid.len(), "terrain classified");

    Ok(TerrainMap {
        primary: primary_field,
        secondary: secondary_field,
        grid,
    })
}
