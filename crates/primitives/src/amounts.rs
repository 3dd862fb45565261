//! Denomination scaling and display formatting.

/// Micro-denomination scaling factor: 1 AXL = 10^6 uaxl.
pub const UAXL_PER_AXL: u64 = 1_000_000;

/// Convert a uaxl amount to AXL.
pub fn uaxl_to_axl(uaxl: f64) -> f64 {
    uaxl / UAXL_PER_AXL as f64
}

/// Division that treats a zero denominator as "no value" instead of
/// infinity or a panic.
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 { None } else { Some(numerator / denominator) }
}

/// Map the NaN an aggregate produces over an empty result set to `None` so
/// the value serializes as JSON `null` instead of failing to serialize.
pub fn nan_to_none(value: f64) -> Option<f64> {
    if value.is_nan() { None } else { Some(value) }
}

/// Compact display form for chart annotations: `1.5B`, `2.3M`, `14.0K`.
pub fn human_format(num: f64) -> String {
    if num >= 1e9 {
        format!("{:.1}B", num / 1e9)
    } else if num >= 1e6 {
        format!("{:.1}M", num / 1e6)
    } else if num >= 1e3 {
        format!("{:.1}K", num / 1e3)
    } else {
        format!("{}", num as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uaxl_scaling() {
        assert_eq!(uaxl_to_axl(1_000_000.0), 1.0);
        assert_eq!(uaxl_to_axl(2_500_000.0), 2.5);
        assert_eq!(uaxl_to_axl(0.0), 0.0);
    }

    #[test]
    fn safe_div_guards_zero() {
        assert_eq!(safe_div(10.0, 2.0), Some(5.0));
        assert_eq!(safe_div(10.0, 0.0), None);
        assert_eq!(safe_div(0.0, 0.0), None);
    }

    #[test]
    fn nan_becomes_none() {
        assert_eq!(nan_to_none(f64::NAN), None);
        assert_eq!(nan_to_none(1.25), Some(1.25));
        assert_eq!(nan_to_none(0.0), Some(0.0));
    }

    #[test]
    fn human_format_scales() {
        assert_eq!(human_format(1_500_000_000.0), "1.5B");
        assert_eq!(human_format(2_300_000.0), "2.3M");
        assert_eq!(human_format(14_000.0), "14.0K");
        assert_eq!(human_format(999.0), "999");
        assert_eq!(human_format(0.0), "0");
    }
}
