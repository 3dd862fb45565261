//! Growth delta classification for KPI tiles.

use serde::Serialize;
use utoipa::ToSchema;

use crate::amounts::safe_div;

/// Direction indicator attached to a growth percentage.
///
/// Zero is deliberately its own case: a flat metric renders with a neutral
/// marker, not a red "down" arrow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Delta is strictly positive.
    Up,
    /// Delta is strictly negative.
    Down,
    /// Delta is exactly zero.
    Flat,
}

impl Trend {
    /// Classify a numeric delta.
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

/// Percentage change from `previous` to `current`.
///
/// Returns `None` when the baseline is zero; the upstream dashboard divided
/// unguarded in some page variants and crashed, so null-propagation is the
/// documented behavior here.
pub fn growth_pct(current: u64, previous: u64) -> Option<f64> {
    safe_div(current as f64 - previous as f64, previous as f64).map(|r| r * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_delta_is_up() {
        assert_eq!(Trend::from_delta(0.01), Trend::Up);
        assert_eq!(Trend::from_delta(1e9), Trend::Up);
    }

    #[test]
    fn negative_delta_is_down() {
        assert_eq!(Trend::from_delta(-0.01), Trend::Down);
        assert_eq!(Trend::from_delta(-1e9), Trend::Down);
    }

    #[test]
    fn zero_delta_is_flat_not_down() {
        assert_eq!(Trend::from_delta(0.0), Trend::Flat);
        assert_eq!(Trend::from_delta(-0.0), Trend::Flat);
    }

    #[test]
    fn growth_pct_basic() {
        assert_eq!(growth_pct(150, 100), Some(50.0));
        assert_eq!(growth_pct(50, 100), Some(-50.0));
        assert_eq!(growth_pct(100, 100), Some(0.0));
    }

    #[test]
    fn growth_pct_zero_baseline_is_none() {
        assert_eq!(growth_pct(100, 0), None);
        assert_eq!(growth_pct(0, 0), None);
    }
}
