//! Wires configuration into the terrain core and formats the result for a terminal.

use std::fmt::Write as _;

use atlas_config::{ClassificationConfig, Config, ConfigError, MapConfig, NoiseSettings};
use atlas_terrain::seed::derive_secondary_seed;
use atlas_terrain::{
    CategoryDef, CategoryId, CategoryRegistry, CategoryRegistryError, ClassificationRule,
    ClassificationTable, ClassifiedGrid, NoiseBasis, NoiseConfig, OverlayRule, TerrainClassifier,
    TerrainError, TerrainMap, generate_terrain,
};
use glam::DVec2;

/// Errors surfaced by the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Loading or saving `config.ron` failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The core rejected the configuration or inputs.
    #[error(transparent)]
    Terrain(#[from] TerrainError),

    /// Two categories share a name.
    #[error(transparent)]
    Registry(#[from] CategoryRegistryError),

    /// A rule, fallback, or overlay names a category that was never declared.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// The rayon worker pool could not be configured.
    #[error("failed to configure worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Everything produced by one run: the category registry and the generated map.
pub struct Report {
    /// Categories referenced by `map.grid`.
    pub registry: CategoryRegistry,
    /// Fields and classified grid.
    pub map: TerrainMap<CategoryId>,
}

/// Convert clamped editable settings into a core [`NoiseConfig`].
///
/// # Errors
///
/// Returns [`AppError::Terrain`] for an unknown basis name.
pub fn noise_config(settings: &NoiseSettings) -> Result<NoiseConfig, AppError> {
    let settings = settings.sanitized();
    Ok(NoiseConfig {
        width: settings.width,
        height: settings.height,
        seed: settings.seed,
        scale: settings.scale,
        octaves: settings.octaves,
        persistence: settings.persistence,
        lacunarity: settings.lacunarity,
        offset: DVec2::new(settings.offset.0, settings.offset.1),
        basis: settings.basis.parse::<NoiseBasis>()?,
    })
}

/// Config for the overlay's gate field.
///
/// Uses `map.secondary` when present. Otherwise, if an overlay is configured,
/// derives one from the primary by reseeding; with no overlay there is no
/// secondary field.
pub fn secondary_config(
    map: &MapConfig,
    primary: &NoiseConfig,
    has_overlay: bool,
) -> Result<Option<NoiseConfig>, AppError> {
    match &map.secondary {
        Some(settings) => Ok(Some(noise_config(settings)?)),
        None if has_overlay => Ok(Some(NoiseConfig {
            seed: derive_secondary_seed(primary.seed),
            ..primary.clone()
        })),
        None => Ok(None),
    }
}

/// Register every declared category, in declaration order.
pub fn build_registry(config: &ClassificationConfig) -> Result<CategoryRegistry, AppError> {
    let mut registry = CategoryRegistry::new();
    for category in &config.categories {
        registry.register(CategoryDef::new(
            category.name.clone(),
            category.color,
            category.glyph,
        ))?;
    }
    Ok(registry)
}

fn resolve(registry: &CategoryRegistry, name: &str) -> Result<CategoryId, AppError> {
    registry
        .lookup_by_name(name)
        .ok_or_else(|| AppError::UnknownCategory(name.to_string()))
}

/// Build the classifier described by `config` over `registry` ids.
///
/// Rules keep their configured order; the fallback becomes the catch-all.
pub fn build_classifier(
    config: &ClassificationConfig,
    registry: &CategoryRegistry,
) -> Result<TerrainClassifier<CategoryId>, AppError> {
    let rules = config
        .rules
        .iter()
        .map(|rule| {
            let category = resolve(registry, &rule.category)?;
            Ok(ClassificationRule::new(rule.threshold, category))
        })
        .collect::<Result<Vec<_>, AppError>>()?;
    let table = ClassificationTable::with_fallback(rules, resolve(registry, &config.fallback)?)?;

    let mut classifier = TerrainClassifier::new(table);
    if let Some(overlay) = &config.overlay {
        classifier = classifier.with_overlay(OverlayRule::new(
            overlay.lower_bound,
            overlay.upper_bound,
            overlay.gate_threshold,
            resolve(registry, &overlay.category)?,
        )?);
    }
    Ok(classifier)
}

/// Generate and classify the map described by `config`.
pub fn run(config: &Config) -> Result<Report, AppError> {
    let registry = build_registry(&config.classification)?;
    let classifier = build_classifier(&config.classification, &registry)?;

    let primary = noise_config(&config.map.primary)?;
    let secondary = secondary_config(&config.map, &primary, classifier.overlay().is_some())?;

    tracing::info!(
        width = primary.width,
        height = primary.height,
        seed = primary.seed,
        categories = registry.len(),
        secondary = secondary.is_some(),
        "generating map"
    );

    let map = generate_terrain(&primary, secondary.as_ref(), &classifier)?;
    Ok(Report { registry, map })
}

/// Per-category cell counts and percentages, one line per category in
/// registration order. Categories with no cells are listed with zero.
pub fn coverage_summary(grid: &ClassifiedGrid<CategoryId>, registry: &CategoryRegistry) -> String {
    let coverage = grid.coverage();
    let total = grid.len().max(1) as f64;
    let mut out = String::new();
    for (id, def) in registry.iter() {
        let count = coverage.get(&id).copied().unwrap_or(0);
        let _ = writeln!(
            out,
            "{} {:<12} {:>7} {:>6.2}%",
            def.glyph,
            def.name,
            count,
            count as f64 * 100.0 / total
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_config::{CategorySettings, OverlaySettings, RuleSettings};

    fn small_config() -> Config {
        let mut config = Config::default();
        config.map.primary.width = 24;
        config.map.primary.height = 12;
        config.map.primary.seed = 1;
        config
    }

    #[test]
    fn test_run_default_config() {
        let report = run(&small_config()).unwrap();
        assert_eq!(report.map.grid.dimensions(), (24, 12));
        assert!(report.map.secondary.is_some(), "default overlay needs a gate field");
        assert!(
            report
                .map
                .grid
                .as_slice()
                .iter()
                .all(|&id| report.registry.get(id).is_some())
        );
    }

    #[test]
    fn test_run_is_deterministic() {
        let a = run(&small_config()).unwrap();
        let b = run(&small_config()).unwrap();
        assert_eq!(a.map.grid, b.map.grid);
    }

    #[test]
    fn test_no_overlay_no_secondary() {
        let mut config = small_config();
        config.classification.overlay = None;
        let report = run(&config).unwrap();
        assert!(report.map.secondary.is_none());
    }

    #[test]
    fn test_unknown_rule_category_rejected() {
        let mut config = small_config();
        config.classification.rules.push(RuleSettings {
            threshold: 0.1,
            category: "lava".to_string(),
        });
        let err = run(&config).err().unwrap();
        assert!(matches!(err, AppError::UnknownCategory(name) if name == "lava"));
    }

    #[test]
    fn test_unknown_overlay_category_rejected() {
        let mut config = small_config();
        config.classification.overlay = Some(OverlaySettings {
            lower_bound: 0.1,
            upper_bound: 0.2,
            gate_threshold: 0.5,
            category: "castle".to_string(),
        });
        assert!(matches!(run(&config), Err(AppError::UnknownCategory(_))));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut config = small_config();
        config.classification.categories.push(CategorySettings {
            name: "sand".to_string(),
            color: (0, 0, 0),
            glyph: 's',
        });
        assert!(matches!(run(&config), Err(AppError::Registry(_))));
    }

    #[test]
    fn test_invalid_scale_surfaces_terrain_error() {
        let mut config = small_config();
        config.map.primary.scale = 0.0;
        assert!(matches!(
            run(&config),
            Err(AppError::Terrain(TerrainError::InvalidConfig { .. }))
        ));
    }

    #[test]
    fn test_excessive_octaves_surface_terrain_error() {
        let mut config = small_config();
        config.map.primary.octaves = 67;
        assert!(matches!(
            run(&config),
            Err(AppError::Terrain(TerrainError::InvalidConfig { .. }))
        ));
    }

    #[test]
    fn test_noise_config_clamps_and_parses() {
        let settings = NoiseSettings {
            width: 0,
            lacunarity: 0.5,
            basis: "Simplex".to_string(),
            offset: (1.5, -2.0),
            ..Default::default()
        };
        let config = noise_config(&settings).unwrap();
        assert_eq!(config.width, 1);
        assert_eq!(config.lacunarity, 1.0);
        assert_eq!(config.basis, NoiseBasis::Simplex);
        assert_eq!(config.offset, DVec2::new(1.5, -2.0));
    }

    #[test]
    fn test_unknown_basis_rejected() {
        let settings = NoiseSettings {
            basis: "cellular".to_string(),
            ..Default::default()
        };
        assert!(matches!(noise_config(&settings), Err(AppError::Terrain(_))));
    }

    #[test]
    fn test_secondary_derived_from_primary() {
        let map = MapConfig::default();
        let primary = noise_config(&map.primary).unwrap();
        let secondary = secondary_config(&map, &primary, true).unwrap().unwrap();
        assert_eq!(secondary.width, primary.width);
        assert_eq!(secondary.seed, derive_secondary_seed(primary.seed));
        assert!(secondary_config(&map, &primary, false).unwrap().is_none());
    }

    #[test]
    fn test_coverage_summary_lists_every_category() {
        let config = small_config();
        let report = run(&config).unwrap();
        let summary = coverage_summary(&report.map.grid, &report.registry);
        assert_eq!(summary.lines().count(), config.classification.categories.len());
        assert!(summary.contains("deep_water"));
        assert!(summary.contains("settlement"));
    }
}
