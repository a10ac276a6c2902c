use super::{floored, AggregationStrategy};
use crate::fixed::{ScoreValue, Weight};
use crate::scorer::weights::{ScoreSet, WeightSet};

/// Weighted geometric mean. A single poor factor drags the total down hard.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricMean;

impl AggregationStrategy for GeometricMean {
    fn id(&self) -> &'static str {
        "geometric_mean"
    }

    fn description(&self) -> &'static str {
        "Weighted geometric mean; rewards balanced profiles"
    }

    fn total(&self, scores: &ScoreSet, weights: &WeightSet) -> f64 {
        let mut log_sum = 0.0;
        let mut total_weight = 0.0;
        for (factor, score) in scores.iter() {
            let w = weights.get(factor).to_real();
            log_sum += w * floored(score).ln();
            total_weight += w;
        }
        if total_weight > 0.0 {
            (log_sum / total_weight).exp()
        } else {
            0.0
        }
    }

    fn weighted_score(&self, score: ScoreValue, weight: Weight) -> f64 {
        (weight.to_real() * floored(score).ln()).exp()
    }
}
