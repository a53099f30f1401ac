//! Classification: ordered threshold tables, gated overlays, and the grid classifier.
//!
//! Maps normalized noise values to discrete terrain categories. Categories are
//! any `Copy` type; [`CategoryRegistry`] supplies named, colored ids for
//! data-driven tables.

mod classifier;
mod overlay;
mod registry;
mod table;

pub use classifier::TerrainClassifier;
pub use overlay::OverlayRule;
pub use registry::{CategoryDef, CategoryId, CategoryRegistry, CategoryRegistryError};
pub use table::{ClassificationRule, ClassificationTable};
