//! Ordered threshold table: maps a normalized value to a category.

use crate::TerrainError;

/// One `(threshold, category)` entry of a [`ClassificationTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationRule<C> {
    /// Values strictly above this threshold match the rule.
    pub threshold: f64,
    /// Category assigned on a match.
    pub category: C,
}

impl<C> ClassificationRule<C> {
    /// Create a rule.
    pub fn new(threshold: f64, category: C) -> Self {
        Self {
            threshold,
            category,
        }
    }
}

/// Ordered first-match rules plus a catch-all.
///
/// Rules are kept in authored order, which is expected to run from the
/// highest threshold to the lowest. The table is never re-sorted: a rule
/// listed after a lower threshold is shadowed for every value the lower
/// threshold already claims.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationTable<C> {
    rules: Vec<ClassificationRule<C>>,
    fallback: C,
}

impl<C: Copy> ClassificationTable<C> {
    /// Build a table whose final rule is the threshold-`0` catch-all.
    ///
    /// # Errors
    ///
    /// - [`TerrainError::EmptyClassificationTable`] if `rules` is empty or its
    ///   last rule does not have threshold `0`.
    /// - [`TerrainError::InvalidThreshold`] if any threshold is not finite.
    pub fn new(mut rules: Vec<ClassificationRule<C>>) -> Result<Self, TerrainError> {
        let catch_all = match rules.pop() {
            Some(last) if last.threshold == 0.0 => last,
            _ => return Err(TerrainError::EmptyClassificationTable),
        };
        Self::with_fallback(rules, catch_all.category)
    }

    /// Build a table from explicit rules and a separate catch-all category.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidThreshold`] if any threshold is not finite.
    pub fn with_fallback(
        rules: Vec<ClassificationRule<C>>,
        fallback: C,
    ) -> Result<Self, TerrainError> {
        if let Some(bad) = rules.iter().find(|r| !r.threshold.is_finite()) {
            return Err(TerrainError::InvalidThreshold(bad.threshold));
        }

        let table = Self { rules, fallback };
        if !table.is_descending() {
            tracing::warn!(
                thresholds = ?table.thresholds().collect::<Vec<_>>(),
                "classification rules are not ordered from highest to lowest threshold; \
                 later rules may be shadowed"
            );
        }
        Ok(table)
    }

    /// Category for a normalized value.
    ///
    /// Returns the category of the first rule whose threshold is strictly
    /// below `value`, or the catch-all. A value equal to a threshold belongs
    /// to the bucket beneath it.
    #[inline]
    pub fn classify(&self, value: f64) -> C {
        self.rules
            .iter()
            .find(|rule| value > rule.threshold)
            .map_or(self.fallback, |rule| rule.category)
    }

    /// The catch-all category.
    pub fn fallback(&self) -> C {
        self.fallback
    }

    /// Non-catch-all rules in authored order.
    pub fn rules(&self) -> &[ClassificationRule<C>] {
        &self.rules
    }

    /// Thresholds in authored order, excluding the catch-all.
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.rules.iter().map(|r| r.threshold)
    }

    /// Every category the table can return, rules first, catch-all last.
    pub fn categories(&self) -> impl Iterator<Item = C> + '_ {
        self.rules
            .iter()
            .map(|r| r.category)
            .chain(std::iter::once(self.fallback))
    }

    /// Number of rules including the catch-all.
    pub fn len(&self) -> usize {
        self.rules.len() + 1
    }

    /// Always `false`: a table holds at least its catch-all.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `true` when thresholds never increase along the table.
    pub fn is_descending(&self) -> bool {
        self.rules
            .windows(2)
            .all(|pair| pair[0].threshold >= pair[1].threshold)
    }
}
