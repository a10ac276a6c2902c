//! Boundary traits for external collaborators, plus the adapters the engine
//! offers on top of them. No implementations ship with the crate.

use crate::entity::Entity;
use crate::error::{EngineError, EngineResult};
use crate::factors::Factor;
use crate::fixed::{ScoreValue, Weight};
use crate::scorer::{normalize_weights, ScoreResult, WeightSet};
use std::collections::{BTreeMap, HashMap};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Regional and temporal weight adjustments, keyed by factor name.
pub trait ContextProvider: Send + Sync {
    fn weight_multipliers(
        &self,
        location: &str,
        timestamp: SystemTime,
    ) -> EngineResult<HashMap<String, f64>>;
}

/// Supplies scores for factors an entity was not rated on.
pub trait DataProvider: Send + Sync {
    fn supplementary_scores(
        &self,
        entity_id: &str,
        missing: &[Factor],
    ) -> EngineResult<BTreeMap<Factor, ScoreValue>>;
}

pub trait PersonalizationConsumer {
    fn recommend(&self, results: &[ScoreResult], user_id: &str) -> EngineResult<Vec<ScoreResult>>;
}

/// Multiplies each named weight, then re-normalizes the set.
///
/// Names that are not factors are skipped with a warning. A negative or
/// non-finite multiplier is a validation error on that factor.
pub fn apply_context(weights: &WeightSet, multipliers: &HashMap<String, f64>) -> EngineResult<WeightSet> {
    let mut adjusted = *weights;
    for (name, &m) in multipliers {
        let Some(factor) = Factor::lookup(name) else {
            warn!("Ignoring context multiplier for unknown factor '{}'", name);
            continue;
        };
        if !m.is_finite() || m < 0.0 {
            return Err(EngineError::validation(
                factor.name(),
                format!("context multiplier {} must be finite and non-negative", m),
            ));
        }
        let w = adjusted.get(factor);
        adjusted.set(factor, Weight::from_real(w.to_real() * m));
        debug!("Context: {} x{:.2} ({} -> {})", factor, m, w, adjusted.get(factor));
    }
    Ok(normalize_weights(&adjusted))
}

/// Asks `provider` for the entity's missing factors and merges whatever comes
/// back. Scores for factors already present are ignored. Returns how many
/// factors were filled.
pub fn fill_missing_scores(entity: &mut Entity, provider: &dyn DataProvider) -> EngineResult<usize> {
    let missing = entity.scores.missing();
    if missing.is_empty() {
        return Ok(0);
    }

    let supplied = provider.supplementary_scores(&entity.id, &missing)?;
    let mut filled = 0;
    for (factor, score) in supplied {
        if entity.scores.is_present(factor) {
            continue;
        }
        entity.set_score(factor, score);
        filled += 1;
    }
    debug!("{}: filled {} of {} missing factors", entity.id, filled, missing.len());
    Ok(filled)
}

/// Convenience over [`ContextProvider`] and [`apply_context`].
pub fn contextual_weights(
    weights: &WeightSet,
    provider: &dyn ContextProvider,
    location: &str,
    timestamp: SystemTime,
) -> EngineResult<WeightSet> {
    let multipliers = provider.weight_multipliers(location, timestamp)?;
    apply_context(weights, &multipliers)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScores;

    impl DataProvider for FixedScores {
        fn supplementary_scores(
            &self,
            _entity_id: &str,
            missing: &[Factor],
        ) -> EngineResult<BTreeMap<Factor, ScoreValue>> {
            let mut out: BTreeMap<Factor, ScoreValue> =
                missing.iter().map(|f| (*f, ScoreValue::from_real(50.0))).collect();
            // present factors must not be overwritten
            out.insert(Factor::Parking, ScoreValue::from_real(1.0));
            Ok(out)
        }
    }

    struct TransitHeavy;

    impl ContextProvider for TransitHeavy {
        fn weight_multipliers(&self, _: &str, _: SystemTime) -> EngineResult<HashMap<String, f64>> {
            Ok(HashMap::from([
                ("distance_to_station".to_string(), 2.0),
                ("ocean_view".to_string(), 3.0),
            ]))
        }
    }

    #[test]
    fn test_apply_context_renormalizes_and_ignores_unknown() {
        let base = WeightSet::new()
            .with(Factor::DistanceToStation, 0.5)
            .with(Factor::Parking, 0.5);
        let adjusted = contextual_weights(&base, &TransitHeavy, "seoul", SystemTime::now()).unwrap();
        assert_eq!(adjusted.get(Factor::DistanceToStation).raw(), 667);
        assert_eq!(adjusted.get(Factor::Parking).raw(), 333);
    }

    #[test]
    fn test_apply_context_rejects_negative_multiplier() {
        let multipliers = HashMap::from([("crime_rate".to_string(), -1.0)]);
        let err = apply_context(&WeightSet::standard(), &multipliers).unwrap_err();
        assert_eq!(err.field(), Some("crime_rate"));
    }

    #[test]
    fn test_fill_missing_scores_only_fills_absent() {
        let mut entity = Entity::new("a1", "Unit", "seoul").with_score(Factor::Parking, 90.0);
        let filled = fill_missing_scores(&mut entity, &FixedScores).unwrap();
        assert_eq!(filled, 13);
        assert_eq!(entity.score(Factor::Parking), Some(ScoreValue::from_real(90.0)));
        assert_eq!(entity.score(Factor::CrimeRate), Some(ScoreValue::from_real(50.0)));
        assert_eq!(fill_missing_scores(&mut entity, &FixedScores).unwrap(), 0);
    }
}
