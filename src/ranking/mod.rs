//! Batch ranking of entities under one strategy.

pub mod relative;

pub use self::relative::{
    evaluate_all, evaluate_relative, find_similar, percentile_of, GroupCriteria, RelativeScore,
    ScoreDistribution, ScoredEntity, SimilarityCriteria,
};

use crate::entity::Entity;
use crate::error::{EngineError, EngineResult};
use crate::scorer::{ScoreResult, Scorer, WeightSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub entity: Entity,
    pub result: ScoreResult,
    /// 1 is best. Ties still receive consecutive ranks.
    pub rank: usize,
    pub percentile: f64,
}

impl RankingResult {
    pub fn score(&self) -> f64 {
        self.result.total_score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub total_entities: usize,
    pub strategy: String,
    pub rankings: Vec<RankingResult>,
    pub score_range: ScoreRange,
}

impl RankingSummary {
    pub fn top(&self, limit: usize) -> &[RankingResult] {
        &self.rankings[..limit.min(self.rankings.len())]
    }

    pub fn scored(&self) -> Vec<ScoredEntity> {
        self.rankings.iter().map(ScoredEntity::from).collect()
    }
}

/// Scores every entity in input order, then sorts best-first.
///
/// The first entity that fails aborts the batch; the error carries its id.
/// Equal totals keep their input order.
pub fn rank_entities(
    scorer: &Scorer,
    entities: &[Entity],
    weights: &WeightSet,
    strategy: &str,
) -> EngineResult<RankingSummary> {
    if entities.is_empty() {
        return Err(EngineError::Evaluation("no entities to rank".to_string()));
    }

    let mut rankings = Vec::with_capacity(entities.len());
    for entity in entities {
        let result = scorer
            .calculate(&entity.scores, weights, strategy)
            .map_err(|e| EngineError::Entity {
                id: entity.id.clone(),
                source: Box::new(e),
            })?;
        debug!("{} scored {:.3}", entity.id, result.total_score);
        rankings.push(RankingResult {
            entity: entity.clone(),
            result,
            rank: 0,
            percentile: 0.0,
        });
    }

    let (min, max, sum) = rankings.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), r| (min.min(r.score()), max.max(r.score()), sum + r.score()),
    );

    rankings.sort_by(|a, b| b.score().total_cmp(&a.score()));
    for (i, r) in rankings.iter_mut().enumerate() {
        r.rank = i + 1;
        r.percentile = if max > min {
            (r.score() - min) / (max - min) * 100.0
        } else {
            100.0
        };
    }

    let avg = sum / rankings.len() as f64;
    info!(
        "Ranked {} entities with {} (min {:.1}, max {:.1}, avg {:.1})",
        rankings.len(),
        strategy,
        min,
        max,
        avg
    );

    Ok(RankingSummary {
        total_entities: entities.len(),
        strategy: strategy.to_string(),
        rankings,
        score_range: ScoreRange { min, max, avg },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::Factor;

    #[test]
    fn test_empty_batch_is_an_error() {
        let err = rank_entities(&Scorer::new(), &[], &WeightSet::standard(), "weighted_sum")
            .unwrap_err();
        assert!(matches!(err, EngineError::Evaluation(_)));
    }

    #[test]
    fn test_failure_names_the_entity() {
        let weights = WeightSet::new().with(Factor::Parking, 1.0);
        let mut bad = Entity::new("b", "Bad", "x");
        bad.set_score(Factor::Parking, crate::fixed::ScoreValue::from_raw(-5));
        let entities = vec![Entity::new("a", "Fine", "x").with_score(Factor::Parking, 50.0), bad];

        let err = rank_entities(&Scorer::new(), &entities, &weights, "weighted_sum").unwrap_err();
        match &err {
            EngineError::Entity { id, .. } => assert_eq!(id, "b"),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(err.field(), Some("parking"));
    }
}
