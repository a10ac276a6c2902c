pub mod pipeline;
pub mod strategies;
pub mod types;
pub mod weights;

pub use self::pipeline::{CalculationPipeline, RunningTotal, Step, StepCondition};
pub use self::strategies::{AggregationStrategy, StrategyRegistry};
pub use self::types::{FactorScore, Grade, Method, ScoreResult};
pub use self::weights::{normalize_weights, validate_scores, validate_weights, ScoreSet, WeightSet};

use crate::error::EngineResult;
use crate::factors::{FactorClassification, FactorTable};
use tracing::debug;

/// Entry point for single-entity scoring: a strategy registry plus the
/// factor classification used by downstream analysis.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    registry: StrategyRegistry,
    classification: FactorClassification,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_classification(mut self, classification: FactorClassification) -> Self {
        self.classification = classification;
        self
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn classification(&self) -> &FactorClassification {
        &self.classification
    }

    /// Validates the inputs, then aggregates them with the strategy named `strategy_id`.
    pub fn calculate(
        &self,
        scores: &ScoreSet,
        weights: &WeightSet,
        strategy_id: &str,
    ) -> EngineResult<ScoreResult> {
        let strategy = self.registry.get(strategy_id)?;
        validate_weights(weights)?;
        validate_scores(scores)?;

        let total_score = strategy.total(scores, weights);
        let factors = FactorTable::from_fn(|factor| {
            let raw = scores.get(factor);
            let weight = weights.get(factor);
            FactorScore {
                raw,
                weight,
                weighted: strategy.weighted_score(raw, weight),
            }
        });
        debug!("{} -> {:.3}", strategy.id(), total_score);

        Ok(ScoreResult {
            total_score,
            factors,
            method: Method::Strategy(strategy.id().to_string()),
        })
    }

    /// Validates the inputs, then runs `pipeline`. Per-factor `weighted`
    /// figures are zero; steps report only into the total.
    pub fn calculate_with_pipeline(
        &self,
        scores: &ScoreSet,
        weights: &WeightSet,
        pipeline: &CalculationPipeline,
    ) -> EngineResult<ScoreResult> {
        validate_weights(weights)?;
        validate_scores(scores)?;

        let total_score = pipeline.run(scores, weights);
        let factors = FactorTable::from_fn(|factor| FactorScore {
            raw: scores.get(factor),
            weight: weights.get(factor),
            weighted: 0.0,
        });

        Ok(ScoreResult {
            total_score,
            factors,
            method: Method::Pipeline(pipeline.name.clone()),
        })
    }

    /// The same input under every registered strategy, in registration order.
    pub fn calculate_all(
        &self,
        scores: &ScoreSet,
        weights: &WeightSet,
    ) -> EngineResult<Vec<ScoreResult>> {
        self.registry
            .ids()
            .into_iter()
            .map(|id| self.calculate(scores, weights, id))
            .collect()
    }
}
