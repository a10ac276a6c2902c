//! Evaluating one entity against a comparison group.

use super::RankingResult;
use crate::error::{EngineError, EngineResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Members within this many points of the target count as similar.
pub const SIMILAR_BAND: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    pub id: String,
    pub location: String,
    pub score: f64,
}

impl ScoredEntity {
    pub fn new(id: &str, location: &str, score: f64) -> Self {
        Self {
            id: id.to_string(),
            location: location.to_string(),
            score,
        }
    }
}

impl From<&RankingResult> for ScoredEntity {
    fn from(r: &RankingResult) -> Self {
        Self::new(&r.entity.id, &r.entity.location, r.score())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub count: usize,
}

impl ScoreDistribution {
    /// `sorted` must be ascending and non-empty.
    fn from_sorted(sorted: &[f64]) -> Self {
        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = sorted.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        Self {
            mean,
            median,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
            q1: sorted[n / 4],
            q3: sorted[n * 3 / 4],
            count: n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupComparison {
    /// Members scoring strictly higher than the target.
    pub higher_count: usize,
    /// Members scoring strictly lower than the target.
    pub lower_count: usize,
    /// Members within [`SIMILAR_BAND`] points, counted independently of the two above.
    pub similar_count: usize,
    /// `higher_count / (group size - 1) * 100`.
    pub rank_percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeScore {
    pub entity_id: String,
    pub absolute_score: f64,
    pub percentile_rank: f64,
    /// Tie-aware: equal scores share a rank.
    pub group_rank: usize,
    pub distribution: ScoreDistribution,
    pub comparison: GroupComparison,
}

fn sorted_scores(group: &[ScoredEntity]) -> Vec<f64> {
    let mut scores: Vec<f64> = group.iter().map(|e| e.score).collect();
    scores.sort_by(f64::total_cmp);
    scores
}

/// Percentile of `score` within `group`, interpolated between the bracketing
/// group scores. 0 when nothing is below it, 100 when everything is.
pub fn percentile_of(score: f64, group: &[ScoredEntity]) -> f64 {
    percentile_in_sorted(score, &sorted_scores(group))
}

fn percentile_in_sorted(score: f64, sorted: &[f64]) -> f64 {
    let n = sorted.len();
    let lower = sorted.iter().take_while(|&&s| s < score).count();
    if lower == 0 {
        return 0.0;
    }
    if lower == n {
        return 100.0;
    }

    let lo = sorted[lower - 1];
    let hi = sorted[lower];
    let span = (n - 1) as f64;
    if hi == lo {
        return (lower - 1) as f64 / span * 100.0;
    }
    let position = (lower - 1) as f64 + (score - lo) / (hi - lo);
    position / span * 100.0
}

pub fn evaluate_relative(target: &ScoredEntity, group: &[ScoredEntity]) -> EngineResult<RelativeScore> {
    if group.is_empty() {
        return Err(EngineError::Evaluation("empty comparison group".to_string()));
    }

    let sorted = sorted_scores(group);
    let distribution = ScoreDistribution::from_sorted(&sorted);
    let percentile_rank = percentile_in_sorted(target.score, &sorted);

    let mut comparison = GroupComparison::default();
    let mut others = 0usize;
    for member in group.iter().filter(|m| m.id != target.id) {
        others += 1;
        if member.score > target.score {
            comparison.higher_count += 1;
        } else if member.score < target.score {
            comparison.lower_count += 1;
        }
        if (member.score - target.score).abs() <= SIMILAR_BAND {
            comparison.similar_count += 1;
        }
    }
    // the target may sit outside the group
    if others > 0 {
        comparison.rank_percentile = comparison.higher_count as f64 / others as f64 * 100.0;
    }

    Ok(RelativeScore {
        entity_id: target.id.clone(),
        absolute_score: target.score,
        percentile_rank,
        group_rank: comparison.higher_count + 1,
        distribution,
        comparison,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityCriteria {
    /// Share of the similarity taken from location, 0 to 1.
    pub location_weight: f64,
    /// Largest score difference considered at all.
    pub score_range: f64,
    pub min_similarity: f64,
    pub max_results: usize,
}

impl Default for SimilarityCriteria {
    fn default() -> Self {
        Self {
            location_weight: 0.0,
            score_range: 10.0,
            min_similarity: 0.6,
            max_results: 10,
        }
    }
}

/// Candidates close to `target` in score (and optionally location), in
/// candidate order. The target itself is skipped by id.
pub fn find_similar<'a>(
    target: &ScoredEntity,
    candidates: &'a [ScoredEntity],
    criteria: &SimilarityCriteria,
) -> Vec<&'a ScoredEntity> {
    let defaults = SimilarityCriteria::default();
    let range = if criteria.score_range > 0.0 {
        criteria.score_range
    } else {
        defaults.score_range
    };
    let max_results = if criteria.max_results > 0 {
        criteria.max_results
    } else {
        defaults.max_results
    };
    let lw = criteria.location_weight;

    let mut similar = Vec::new();
    for candidate in candidates.iter().filter(|c| c.id != target.id) {
        let diff = (candidate.score - target.score).abs();
        if diff > range {
            continue;
        }
        let location = if lw > 0.0 && candidate.location != target.location {
            0.5
        } else {
            1.0
        };
        let similarity = (1.0 - diff / range) * (1.0 - lw) + location * lw;
        if similarity >= criteria.min_similarity {
            similar.push(candidate);
        }
        if similar.len() >= max_results {
            break;
        }
    }
    similar
}

/// How each entity's comparison group is drawn from the batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupCriteria {
    pub min_score: f64,
    pub max_score: f64,
    /// 0 means unlimited.
    pub max_group_size: usize,
}

impl Default for GroupCriteria {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            max_score: 100.0,
            max_group_size: 0,
        }
    }
}

impl GroupCriteria {
    fn select(&self, candidates: &[ScoredEntity]) -> Vec<ScoredEntity> {
        let in_range = candidates
            .iter()
            .filter(|c| c.score >= self.min_score && c.score <= self.max_score);
        match self.max_group_size {
            0 => in_range.cloned().collect(),
            limit => in_range.take(limit).cloned().collect(),
        }
    }
}

/// Evaluates every entity against the group `criteria` draws from the batch.
/// Entities whose group comes out empty are left out. Output keeps input order.
pub fn evaluate_all(
    entities: &[ScoredEntity],
    criteria: &GroupCriteria,
) -> EngineResult<Vec<RelativeScore>> {
    if entities.is_empty() {
        return Err(EngineError::Evaluation("no entities to evaluate".to_string()));
    }

    let group = criteria.select(entities);
    let results: Vec<RelativeScore> = entities
        .par_iter()
        .filter_map(|entity| match evaluate_relative(entity, &group) {
            Ok(score) => Some(score),
            Err(e) => {
                debug!("Skipping {}: {}", entity.id, e);
                None
            }
        })
        .collect();

    info!(
        "Evaluated {} of {} entities against a group of {}",
        results.len(),
        entities.len(),
        group.len()
    );
    Ok(results)
}
