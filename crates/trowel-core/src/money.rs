//! Output-boundary rounding.
//!
//! Accumulate with raw `f64`; call these only when building a value that
//! leaves the engine.

/// Round to 2 decimal places (half away from zero).
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    // Adding 0.0 turns -0.0 into 0.0 so serialized output never shows "-0.0".
    (value * 100.0).round() / 100.0 + 0.0
}

/// `part / whole * 100`, or `0.0` when `whole` is zero.
#[must_use]
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole.abs() < f64::EPSILON {
        0.0
    } else {
        part / whole * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert!((round_currency(10.005_1) - 10.01).abs() < f64::EPSILON);
        assert!((round_currency(2.344) - 2.34).abs() < f64::EPSILON);
        assert!((round_currency(-1.555_1) + 1.56).abs() < f64::EPSILON);
        assert!(round_currency(f64::NAN).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_zero_is_normalized() {
        let value = round_currency(-0.001);
        assert!(value.is_sign_positive());
        assert_eq!(serde_json::to_string(&value).unwrap(), "0.0");
    }

    #[test]
    fn percent_of_zero_whole_is_zero() {
        assert!(percent_of(5.0, 0.0).abs() < f64::EPSILON);
        assert!((percent_of(30.0, 100.0) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn accumulate_then_round_beats_round_then_accumulate() {
        let parts = [0.333_3_f64; 3];
        let raw: f64 = parts.iter().sum();
        let pre_rounded: f64 = parts.iter().map(|p| round_currency(*p)).sum();
        assert!((round_currency(raw) - 1.0).abs() < f64::EPSILON);
        assert!((round_currency(pre_rounded) - 0.99).abs() < f64::EPSILON);
    }
}
