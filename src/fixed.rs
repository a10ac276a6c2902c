//! Scaled-integer score and weight values.
//!
//! Scores (0–100) and weights (0–1) are stored as `i32` multiplied by [`SCALE`],
//! which keeps three decimal places exact across repeated multiply/divide
//! steps. Products go through [`mul_div_score`], which widens to `i64`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point scale shared by scores and weights (3 decimal places).
pub const SCALE: i32 = 1000;

/// Largest valid raw score (100.000).
pub const MAX_SCORE_RAW: i32 = 100 * SCALE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct ScoreValue(i32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct Weight(i32);

impl ScoreValue {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(MAX_SCORE_RAW);

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub fn from_real(value: f64) -> Self {
        Self(to_scaled(value))
    }

    pub fn to_real(self) -> f64 {
        f64::from(self.0) / f64::from(SCALE)
    }

    pub fn is_in_range(self) -> bool {
        (0..=MAX_SCORE_RAW).contains(&self.0)
    }
}

impl Weight {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(SCALE);

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub fn from_real(value: f64) -> Self {
        Self(to_scaled(value))
    }

    pub fn to_real(self) -> f64 {
        f64::from(self.0) / f64::from(SCALE)
    }

    pub fn is_in_range(self) -> bool {
        (0..=SCALE).contains(&self.0)
    }
}

#[inline]
fn to_scaled(value: f64) -> i32 {
    (value * f64::from(SCALE)).round() as i32
}

/// `score * weight / weight_scale` with an `i64` intermediate, so the product of
/// two in-range operands never overflows. Truncates toward zero.
#[inline]
pub fn mul_div_score(score: ScoreValue, weight: Weight, weight_scale: i32) -> ScoreValue {
    let product = i64::from(score.0) * i64::from(weight.0);
    ScoreValue((product / i64::from(weight_scale)) as i32)
}

/// [`mul_div_score`] against the standard weight scale.
#[inline]
pub fn apply_weight(score: ScoreValue, weight: Weight) -> ScoreValue {
    mul_div_score(score, weight, SCALE)
}

/// `Σ(score * weight) / total_weight` with a single truncating division, so a
/// weighted mean is never more than one unit below its exact value.
#[inline]
pub fn weighted_mean(product_sum: i64, total_weight: i64) -> ScoreValue {
    ScoreValue((product_sum / total_weight) as i32)
}

impl From<ScoreValue> for f64 {
    fn from(value: ScoreValue) -> Self {
        value.to_real()
    }
}

impl From<f64> for ScoreValue {
    fn from(value: f64) -> Self {
        Self::from_real(value)
    }
}

impl From<Weight> for f64 {
    fn from(value: Weight) -> Self {
        value.to_real()
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Self::from_real(value)
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.to_real())
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.to_real())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_round_trip() {
        for v in [0.0, 0.1, 42.125, 85.5, 99.999, 100.0] {
            assert_eq!(ScoreValue::from_real(v).to_real(), v);
        }
        for v in [0.0, 0.001, 0.07, 0.29, 0.57, 1.0] {
            assert_eq!(Weight::from_real(v).to_real(), v);
        }
    }

    #[test]
    fn test_from_real_rounds_instead_of_truncating() {
        // 4.35 has no exact binary representation
        assert_eq!(ScoreValue::from_real(4.35).raw(), 4350);
    }

    #[test]
    fn test_mul_div_at_maximum_operands() {
        let out = mul_div_score(ScoreValue::MAX, Weight::ONE, SCALE);
        assert_eq!(out, ScoreValue::MAX);
    }

    #[test]
    fn test_mul_div_truncates_toward_zero() {
        // 85.5 * 0.333 = 28.4715 -> 28.471
        let out = apply_weight(ScoreValue::from_real(85.5), Weight::from_real(0.333));
        assert_eq!(out.raw(), 28_471);
    }

    #[test]
    fn test_ranges() {
        assert!(ScoreValue::MAX.is_in_range());
        assert!(!ScoreValue::from_raw(MAX_SCORE_RAW + 1).is_in_range());
        assert!(!ScoreValue::from_raw(-1).is_in_range());
        assert!(Weight::ONE.is_in_range());
        assert!(!Weight::from_raw(SCALE + 1).is_in_range());
    }

    #[test]
    fn test_serde_uses_real_numbers() {
        let json = serde_json::to_string(&ScoreValue::from_real(72.5)).unwrap();
        assert_eq!(json, "72.5");
        let w: Weight = serde_json::from_str("0.15").unwrap();
        assert_eq!(w.raw(), 150);
    }
}
