//! Configuration system for the atlas map generator.
//!
//! Provides map, classification and preview settings that persist to disk as
//! RON files. Supports CLI overrides via clap, input clamping, and
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CategorySettings, ClassificationConfig, Config, DebugConfig, MapConfig,
    NoiseSettings, OverlaySettings, RenderConfig, RuleSettings,
};
pub use error::ConfigError;
