//! Aggregation mathematics, selected by identifier through a [`StrategyRegistry`].
//!
//! Every strategy works in real units (score 0–100, weight 0–1). Scores below
//! [`MIN_SCORE`] are floored before any logarithm or division.

pub mod geometric_mean;
pub mod harmonic_mean;
pub mod min_max;
pub mod weighted_sum;

pub use self::geometric_mean::GeometricMean;
pub use self::harmonic_mean::HarmonicMean;
pub use self::min_max::MinMax;
pub use self::weighted_sum::WeightedSum;

use crate::error::{EngineError, EngineResult};
use crate::fixed::{ScoreValue, Weight};
use crate::scorer::weights::{ScoreSet, WeightSet};
use std::sync::Arc;

pub const MIN_SCORE: f64 = 0.1;

pub trait AggregationStrategy: Send + Sync {
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Total over all factors. Inputs are already validated.
    fn total(&self, scores: &ScoreSet, weights: &WeightSet) -> f64;

    /// Per-factor figure reported alongside the total.
    fn weighted_score(&self, score: ScoreValue, weight: Weight) -> f64;
}

#[inline(always)]
pub(crate) fn floored(score: ScoreValue) -> f64 {
    score.to_real().max(MIN_SCORE)
}

/// Strategies keyed by identifier, in registration order.
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn AggregationStrategy>>,
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Registers `strategy`, replacing any strategy with the same identifier.
    pub fn register(&mut self, strategy: Arc<dyn AggregationStrategy>) {
        match self.strategies.iter().position(|s| s.id() == strategy.id()) {
            Some(i) => self.strategies[i] = strategy,
            None => self.strategies.push(strategy),
        }
    }

    pub fn get(&self, id: &str) -> EngineResult<&dyn AggregationStrategy> {
        self.strategies
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.as_ref())
            .ok_or_else(|| EngineError::UnsupportedStrategy(id.to_string()))
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn AggregationStrategy> + '_ {
        self.strategies.iter().map(|s| s.as_ref())
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(WeightedSum));
        registry.register(Arc::new(GeometricMean));
        registry.register(Arc::new(MinMax));
        registry.register(Arc::new(HarmonicMean));
        registry
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = StrategyRegistry::default();
        assert_eq!(
            registry.ids(),
            vec!["weighted_sum", "geometric_mean", "min_max", "harmonic_mean"]
        );
    }

    #[test]
    fn test_unknown_identifier() {
        let registry = StrategyRegistry::default();
        match registry.get("median") {
            Err(EngineError::UnsupportedStrategy(id)) => assert_eq!(id, "median"),
            other => panic!("expected UnsupportedStrategy, got {:?}", other.map(|s| s.id())),
        }
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = StrategyRegistry::default();
        registry.register(Arc::new(MinMax));
        assert_eq!(registry.ids().len(), 4);
    }
}
