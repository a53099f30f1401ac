//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the config inside its directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

const APP_NAME: &str = "atlas";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Noise field settings.
    pub map: MapConfig,
    /// Categories, rules and overlay.
    pub classification: ClassificationConfig,
    /// Preview output settings.
    pub render: RenderConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Noise settings for the primary field and the optional secondary field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Elevation field that the rule table classifies.
    pub primary: NoiseSettings,
    /// Gate field for the overlay. When absent and an overlay is configured,
    /// a reseeded copy of `primary` is used.
    pub secondary: Option<NoiseSettings>,
}

/// Editable settings for one fractal noise field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseSettings {
    /// Map width in cells.
    pub width: u32,
    /// Map height in cells.
    pub height: u32,
    /// Generation seed.
    pub seed: i64,
    /// Size of one noise unit in cells.
    pub scale: f64,
    /// Number of octaves.
    pub octaves: u32,
    /// Amplitude falloff per octave (0.0 - 1.0).
    pub persistence: f64,
    /// Frequency growth per octave (>= 1.0).
    pub lacunarity: f64,
    /// Pan `(x, y)` in noise units.
    pub offset: (f64, f64),
    /// Basis primitive name: "perlin", "simplex" or "value".
    pub basis: String,
}

/// One terrain category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySettings {
    /// Unique name referenced by rules.
    pub name: String,
    /// RGB display color.
    pub color: (u8, u8, u8),
    /// Character used by the text preview.
    pub glyph: char,
}

/// One `(threshold, category)` rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleSettings {
    /// Values strictly above this threshold match.
    pub threshold: f64,
    /// Category name.
    pub category: String,
}

/// Secondary-field-gated overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlaySettings {
    /// Exclusive lower bound on the primary field.
    pub lower_bound: f64,
    /// Exclusive upper bound on the primary field.
    pub upper_bound: f64,
    /// Secondary values strictly above this apply the overlay.
    pub gate_threshold: f64,
    /// Category name written by the overlay.
    pub category: String,
}

/// Categories plus the ordered rule table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Every category rules and overlay may refer to.
    pub categories: Vec<CategorySettings>,
    /// Rules from highest threshold to lowest, without the catch-all.
    pub rules: Vec<RuleSettings>,
    /// Catch-all category for values at or below every threshold.
    pub fallback: String,
    /// Optional overlay.
    pub overlay: Option<OverlaySettings>,
}

/// Preview output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Print one glyph per cell.
    pub ascii_preview: bool,
    /// Print per-category cell counts.
    pub coverage_summary: bool,
    /// Worker threads for generation (0 = one per CPU).
    pub threads: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            width: 96,
            height: 48,
            seed: 0,
            scale: 25.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: (0.0, 0.0),
            basis: "perlin".to_string(),
        }
    }
}

impl CategorySettings {
    fn new(name: &str, color: (u8, u8, u8), glyph: char) -> Self {
        Self {
            name: name.to_string(),
            color,
            glyph,
        }
    }
}

impl RuleSettings {
    fn new(threshold: f64, category: &str) -> Self {
        Self {
            threshold,
            category: category.to_string(),
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                CategorySettings::new("deep_water", (0, 0, 128), '~'),
                CategorySettings::new("water", (30, 80, 200), '-'),
                CategorySettings::new("sand", (220, 200, 130), ':'),
                CategorySettings::new("grass", (100, 180, 60), '.'),
                CategorySettings::new("forest", (30, 120, 30), 'T'),
                CategorySettings::new("mountain", (130, 110, 90), '^'),
                CategorySettings::new("snow", (240, 240, 250), '*'),
                CategorySettings::new("settlement", (200, 40, 40), '#'),
            ],
            rules: vec![
                RuleSettings::new(0.85, "snow"),
                RuleSettings::new(0.7, "mountain"),
                RuleSettings::new(0.55, "forest"),
                RuleSettings::new(0.42, "grass"),
                RuleSettings::new(0.38, "sand"),
                RuleSettings::new(0.25, "water"),
            ],
            fallback: "deep_water".to_string(),
            overlay: Some(OverlaySettings {
                lower_bound: 0.42,
                upper_bound: 0.55,
                gate_threshold: 0.75,
                category: "settlement".to_string(),
            }),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ascii_preview: true,
            coverage_summary: true,
            threads: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Input clamping ---

impl NoiseSettings {
    /// Copy with user-editable fields clamped into the ranges the generator accepts.
    ///
    /// Width and height are raised to 1, lacunarity to 1, and persistence is
    /// clamped to `[0, 1]`. Each adjustment is logged. Scale is left alone:
    /// a non-positive scale is reported by the generator instead.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        if out.width < 1 {
            log::warn!("width {} clamped to 1", out.width);
            out.width = 1;
        }
        if out.height < 1 {
            log::warn!("height {} clamped to 1", out.height);
            out.height = 1;
        }
        if out.lacunarity < 1.0 {
            log::warn!("lacunarity {} clamped to 1", out.lacunarity);
            out.lacunarity = 1.0;
        }
        if !(0.0..=1.0).contains(&out.persistence) && !out.persistence.is_nan() {
            let clamped = out.persistence.clamp(0.0, 1.0);
            log::warn!("persistence {} clamped to {clamped}", out.persistence);
            out.persistence = clamped;
        }
        out
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for this application (`<config_dir>/atlas`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
