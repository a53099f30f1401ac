//! Error types for field generation and classification.

/// Errors reported by the generator, the classification table, and the classifier.
///
/// All of them are raised before any per-cell work starts; there is no
/// partial-result mode.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The noise configuration cannot produce a field.
    #[error("invalid noise config: {reason}")]
    InvalidConfig {
        /// Human-readable description of the offending field.
        reason: String,
    },

    /// Primary and secondary fields were given with different sizes.
    #[error(
        "dimension mismatch: primary field is {}x{}, secondary field is {}x{}",
        primary.0, primary.1, secondary.0, secondary.1
    )]
    DimensionMismatch {
        /// `(width, height)` of the primary field.
        primary: (u32, u32),
        /// `(width, height)` of the secondary field.
        secondary: (u32, u32),
    },

    /// A classification table was built without a catch-all rule.
    #[error("classification table has no catch-all rule")]
    EmptyClassificationTable,

    /// A rule threshold, overlay bound, or overlay gate is NaN or infinite.
    #[error("threshold must be finite, got {0}")]
    InvalidThreshold(f64),
}

impl TerrainError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
