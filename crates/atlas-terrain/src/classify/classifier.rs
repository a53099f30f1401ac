//! Composes noise fields through a classification table into a category grid.

use std::time::Instant;

use rayon::prelude::*;

use super::{ClassificationTable, OverlayRule};
use crate::TerrainError;
use crate::grid::{ClassifiedGrid, Grid, NoiseField};

/// Classifies every cell of a primary field, optionally applying an overlay
/// gated by a secondary field.
#[derive(Clone, Debug)]
pub struct TerrainClassifier<C> {
    table: ClassificationTable<C>,
    overlay: Option<OverlayRule<C>>,
}

impl<C> TerrainClassifier<C>
where
    C: Copy + Send + Sync,
{
    /// Classifier with no overlay.
    pub fn new(table: ClassificationTable<C>) -> Self {
        Self {
            table,
            overlay: None,
        }
    }

    /// Attach an overlay rule.
    pub fn with_overlay(mut self, overlay: OverlayRule<C>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// The base classification table.
    pub fn table(&self) -> &ClassificationTable<C> {
        &self.table
    }

    /// The overlay rule, if any.
    pub fn overlay(&self) -> Option<&OverlayRule<C>> {
        self.overlay.as_ref()
    }

    /// Category for a single cell.
    ///
    /// The overlay is only consulted when a secondary value is supplied.
    #[inline]
    pub fn classify_cell(&self, primary: f64, secondary: Option<f64>) -> C {
        let base = self.table.classify(primary);
        match (&self.overlay, secondary) {
            (Some(overlay), Some(secondary)) => overlay.resolve(base, primary, secondary),
            _ => base,
        }
    }

    /// Classify every cell of `primary`.
    ///
    /// When both `secondary` and an overlay are present, cells inside the
    /// overlay band whose secondary value opens the gate take the overlay
    /// category.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::DimensionMismatch`] if `secondary` is given and
    /// its dimensions differ from `primary`'s. No cell is classified in that case.
    pub fn classify(
        &self,
        primary: &NoiseField,
        secondary: Option<&NoiseField>,
    ) -> Result<ClassifiedGrid<C>, TerrainError> {
        if let Some(secondary) = secondary
            && secondary.dimensions() != primary.dimensions()
        {
            return Err(TerrainError::DimensionMismatch {
                primary: primary.dimensions(),
                secondary: secondary.dimensions(),
            });
        }

        let (width, height) = primary.dimensions();
        let _span = tracing::debug_span!(
            "classify",
            width,
            height,
            rules = self.table.len(),
            overlay = self.overlay.is_some(),
        )
        .entered();
        let start = Instant::now();

        if self.overlay.is_some() && secondary.is_none() {
            tracing::debug!("overlay configured without a secondary field; skipping overlay");
        }

        let cells: Vec<C> = match secondary {
            Some(secondary) => primary
                .as_slice()
                .par_iter()
                .zip(secondary.as_slice().par_iter())
                .map(|(&p, &s)| self.classify_cell(p, Some(s)))
                .collect(),
            None => primary
                .as_slice()
                .par_iter()
                .map(|&p| self.classify_cell(p, None))
                .collect(),
        };

        tracing::debug!(
            elapsed_us = start.elapsed().as_micros() as u64,
            "classification complete"
        );

        Ok(Grid::from_cells(width, height, cells))
    }
}
