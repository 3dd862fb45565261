//! Qualitative labels for correlation coefficients.

use serde::Serialize;
use utoipa::ToSchema;

/// Strength label for a Pearson coefficient in `[-1, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationStrength {
    /// Coefficient is exactly zero.
    NoRelationship,
    /// Magnitude in `(0, 0.3]`.
    Weak,
    /// Magnitude in `(0.3, 0.7]`.
    Moderate,
    /// Magnitude in `(0.7, 1)`.
    Strong,
    /// Coefficient is exactly `1` or `-1`.
    Perfect,
}

impl CorrelationStrength {
    /// Map a coefficient to its label. Total over `[-1, 1]`; values outside
    /// the interval are clamped before classification so a slightly
    /// out-of-range warehouse result cannot panic downstream.
    pub fn from_coefficient(coefficient: f64) -> Self {
        let c = coefficient.clamp(-1.0, 1.0).abs();
        if c == 0.0 {
            Self::NoRelationship
        } else if c == 1.0 {
            Self::Perfect
        } else if c <= 0.3 {
            Self::Weak
        } else if c <= 0.7 {
            Self::Moderate
        } else {
            Self::Strong
        }
    }

    /// Human-readable description used in KPI captions.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NoRelationship => "no relationship",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::Perfect => "perfect",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_no_relationship() {
        assert_eq!(CorrelationStrength::from_coefficient(0.0), CorrelationStrength::NoRelationship);
        assert_eq!(
            CorrelationStrength::from_coefficient(0.0).description(),
            "no relationship"
        );
    }

    #[test]
    fn unit_magnitudes_are_perfect() {
        assert_eq!(CorrelationStrength::from_coefficient(1.0), CorrelationStrength::Perfect);
        assert_eq!(CorrelationStrength::from_coefficient(-1.0), CorrelationStrength::Perfect);
    }

    #[test]
    fn breakpoints_are_inclusive_on_the_low_side() {
        assert_eq!(CorrelationStrength::from_coefficient(0.3), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::from_coefficient(0.31), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(0.7), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(0.71), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.999), CorrelationStrength::Strong);
    }

    #[test]
    fn negative_side_mirrors_positive() {
        assert_eq!(CorrelationStrength::from_coefficient(-0.2), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::from_coefficient(-0.5), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(-0.9), CorrelationStrength::Strong);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(CorrelationStrength::from_coefficient(1.0001), CorrelationStrength::Perfect);
        assert_eq!(CorrelationStrength::from_coefficient(-7.0), CorrelationStrength::Perfect);
    }
}
