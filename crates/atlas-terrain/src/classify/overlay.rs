//! Secondary-field-gated overlay: places a feature inside a primary band.

use crate::TerrainError;

/// Overrides the base category where the primary value lies strictly inside
/// `(lower_bound, upper_bound)` and the secondary value strictly exceeds
/// `gate_threshold`.
///
/// Typical use is settlement placement: lowland band on the elevation field,
/// gated by an unrelated noise channel so features do not follow the terrain.
/// Built only through [`OverlayRule::new`], which rejects non-finite bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayRule<C> {
    /// Exclusive lower bound on the primary value.
    lower_bound: f64,
    /// Exclusive upper bound on the primary value.
    upper_bound: f64,
    /// Secondary values strictly above this open the gate.
    gate_threshold: f64,
    /// Category written where the overlay applies.
    category: C,
}

impl<C: Copy> OverlayRule<C> {
    /// Create an overlay rule.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidThreshold`] if a bound or the gate is not finite.
    pub fn new(
        lower_bound: f64,
        upper_bound: f64,
        gate_threshold: f64,
        category: C,
    ) -> Result<Self, TerrainError> {
        for value in [lower_bound, upper_bound, gate_threshold] {
            if !value.is_finite() {
                return Err(TerrainError::InvalidThreshold(value));
            }
        }
        if lower_bound >= upper_bound {
            tracing::warn!(
                lower_bound,
                upper_bound,
                "overlay band is empty and will never apply"
            );
        }
        Ok(Self {
            lower_bound,
            upper_bound,
            gate_threshold,
            category,
        })
    }

    /// Exclusive lower bound on the primary value.
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Exclusive upper bound on the primary value.
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Secondary values strictly above this open the gate.
    pub fn gate_threshold(&self) -> f64 {
        self.gate_threshold
    }

    /// Category written where the overlay applies.
    pub fn category(&self) -> C {
        self.category
    }

    /// `true` when both the band and the gate conditions hold.
    #[inline]
    pub fn applies(&self, primary: f64, secondary: f64) -> bool {
        primary > self.lower_bound && primary < self.upper_bound && secondary > self.gate_threshold
    }

    /// The overlay category if it applies, otherwise `base`.
    #[inline]
    pub fn resolve(&self, base: C, primary: f64, secondary: f64) -> C {
        if self.applies(primary, secondary) {
            self.category
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settlements() -> OverlayRule<&'static str> {
        OverlayRule::new(0.3, 0.6, 0.8, "settlement").unwrap()
    }

    #[test]
    fn test_open_gate_inside_band_overrides() {
        let overlay = settlements();
        assert!(overlay.applies(0.4, 0.9));
        assert_eq!(overlay.resolve("grass", 0.4, 0.9), "settlement");
    }

    #[test]
    fn test_closed_gate_keeps_base() {
        let overlay = settlements();
        assert!(!overlay.applies(0.4, 0.5));
        assert_eq!(overlay.resolve("grass", 0.4, 0.5), "grass");
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let overlay = settlements();
        assert!(!overlay.applies(0.3, 0.9));
        assert!(!overlay.applies(0.6, 0.9));
        assert!(overlay.applies(0.30001, 0.9));
        assert!(overlay.applies(0.59999, 0.9));
    }

    #[test]
    fn test_gate_is_exclusive() {
        let overlay = settlements();
        assert!(!overlay.applies(0.4, 0.8));
        assert!(overlay.applies(0.4, 0.80001));
    }

    #[test]
    fn test_outside_band_keeps_base() {
        let overlay = settlements();
        assert_eq!(overlay.resolve("water", 0.1, 1.0), "water");
        assert_eq!(overlay.resolve("snow", 0.9, 1.0), "snow");
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        assert_eq!(
            OverlayRule::new(0.3, f64::INFINITY, 0.8, "x"),
            Err(TerrainError::InvalidThreshold(f64::INFINITY))
        );
        assert!(OverlayRule::new(f64::NAN, 0.6, 0.8, "x").is_err());
    }

    #[test]
    fn test_accessors_return_validated_values() {
        let overlay = settlements();
        assert_eq!(overlay.lower_bound(), 0.3);
        assert_eq!(overlay.upper_bound(), 0.6);
        assert_eq!(overlay.gate_threshold(), 0.8);
        assert_eq!(overlay.category(), "settlement");
        assert!(OverlayRule::new(0.3, 0.6, f64::NAN, "x").is_err());
    }

    #[test]
    fn test_empty_band_never_applies() {
        let overlay = OverlayRule::new(0.6, 0.3, 0.0, "x").unwrap();
        for i in 0..=100 {
            assert!(!overlay.applies(i as f64 / 100.0, 1.0));
        }
    }
}
