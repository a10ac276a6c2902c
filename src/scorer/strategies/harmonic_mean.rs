use super::{floored, AggregationStrategy};
use crate::fixed::{ScoreValue, Weight};
use crate::scorer::weights::{ScoreSet, WeightSet};

/// Weighted harmonic mean. Harsher on low factors than the geometric mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarmonicMean;

impl AggregationStrategy for HarmonicMean {
    fn id(&self) -> &'static str {
        "harmonic_mean"
    }

    fn description(&self) -> &'static str {
        "Weighted harmonic mean; heavily penalizes weak factors"
    }

    fn total(&self, scores: &ScoreSet, weights: &WeightSet) -> f64 {
        let mut inverse_sum = 0.0;
        let mut total_weight = 0.0;
        for (factor, score) in scores.iter() {
            let w = weights.get(factor).to_real();
            inverse_sum += w / floored(score);
            total_weight += w;
        }
        if inverse_sum > 0.0 && total_weight > 0.0 {
            total_weight / inverse_sum
        } else {
            0.0
        }
    }

    fn weighted_score(&self, score: ScoreValue, weight: Weight) -> f64 {
        weight.to_real() * floored(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::Factor;

    #[test]
    fn test_two_factor_harmonic_mean() {
        let scores = ScoreSet::new()
            .with(Factor::FloorLevel, 40.0)
            .with(Factor::Parking, 80.0);
        let weights = WeightSet::new()
            .with(Factor::FloorLevel, 0.5)
            .with(Factor::Parking, 0.5);
        // 1 / (0.5/40 + 0.5/80) = 53.33
        let total = HarmonicMean.total(&scores, &weights);
        assert!((total - 160.0 / 3.0).abs() < 1e-9);
    }
}
