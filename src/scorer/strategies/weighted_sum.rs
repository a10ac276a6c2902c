use super::AggregationStrategy;
use crate::fixed::{apply_weight, weighted_mean, ScoreValue, Weight};
use crate::scorer::weights::{ScoreSet, WeightSet};

/// Σ score·weight, divided by the actual weight total.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedSum;

impl AggregationStrategy for WeightedSum {
    fn id(&self) -> &'static str {
        "weighted_sum"
    }

    fn description(&self) -> &'static str {
        "Weighted average of factor scores"
    }

    fn total(&self, scores: &ScoreSet, weights: &WeightSet) -> f64 {
        let total_weight = weights.total();
        if total_weight == 0 {
            return 0.0;
        }
        let product_sum: i64 = scores
            .iter()
            .map(|(factor, score)| i64::from(score.raw()) * i64::from(weights.get(factor).raw()))
            .sum();
        weighted_mean(product_sum, total_weight).to_real()
    }

    fn weighted_score(&self, score: ScoreValue, weight: Weight) -> f64 {
        apply_weight(score, weight).to_real()
    }
}
