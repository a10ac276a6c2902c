use super::AggregationStrategy;
use crate::fixed::{apply_weight, ScoreValue, Weight};
use crate::scorer::weights::{ScoreSet, WeightSet};

/// The weakest factor decides the total; weights only affect the reported
/// per-factor figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMax;

impl AggregationStrategy for MinMax {
    fn id(&self) -> &'static str {
        "min_max"
    }

    fn description(&self) -> &'static str {
        "Lowest factor score; every factor must clear the bar"
    }

    fn total(&self, scores: &ScoreSet, _weights: &WeightSet) -> f64 {
        scores
            .iter()
            .map(|(_, score)| score)
            .fold(ScoreValue::MAX, ScoreValue::min)
            .to_real()
    }

    fn weighted_score(&self, score: ScoreValue, weight: Weight) -> f64 {
        apply_weight(score, weight).to_real()
    }
}
