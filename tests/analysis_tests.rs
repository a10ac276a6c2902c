mod common;

use aptscore::analysis::{analyze, compare_results, Comparison, BASELINE_SCORE};
use aptscore::providers::{contextual_weights, fill_missing_scores, ContextProvider, DataProvider};
use aptscore::scorer::validate_weights;
use aptscore::{EngineResult, Factor, FactorClassification, FactorKind, ScoreValue, Scorer, WeightSet};
use common::EntityBuilder;
use std::collections::{BTreeMap, HashMap};
use std::time::SystemTime;

#[test]
fn test_analysis_of_a_scored_entity() {
    let entity = EntityBuilder::new("a")
        .uniform(70.0)
        .score(Factor::SchoolDistrict, 95.0)
        .score(Factor::CrimeRate, 45.0)
        .build();
    let scorer = Scorer::new();
    let result = scorer
        .calculate(&entity.scores, &WeightSet::standard(), "weighted_sum")
        .unwrap();
    let analysis = analyze(&result, scorer.classification());

    assert_eq!(analysis.strengths, vec![Factor::SchoolDistrict]);
    assert_eq!(analysis.weaknesses, vec![Factor::CrimeRate]);
    assert_eq!(analysis.improvement_tips.len(), 1);
    assert_eq!(analysis.top_factors.len(), 5);
    assert!((analysis.comparison_to_baseline - (result.total_score - BASELINE_SCORE)).abs() < 1e-12);
    // school district outweighs crime rate among the external factors
    assert!(analysis.external_score > analysis.internal_score);
    assert!((analysis.internal_score - 70.0).abs() < 1e-9);
}

#[test]
fn test_reclassified_factor_moves_between_kinds() {
    let entity = EntityBuilder::new("a")
        .score(Factor::Parking, 100.0)
        .score(Factor::CrimeRate, 20.0)
        .build();
    let weights = WeightSet::new()
        .with(Factor::Parking, 0.5)
        .with(Factor::CrimeRate, 0.5);
    let result = Scorer::new()
        .calculate(&entity.scores, &weights, "weighted_sum")
        .unwrap();

    let default = analyze(&result, &FactorClassification::default());
    assert_eq!(default.internal_score, 100.0);
    assert_eq!(default.external_score, 20.0);

    let moved = FactorClassification::default().with_kind(Factor::Parking, FactorKind::External);
    let analysis = analyze(&result, &moved);
    assert_eq!(analysis.internal_score, 0.0);
    assert_eq!(analysis.external_score, 60.0);
}

#[test]
fn test_compare_two_entities() {
    let scorer = Scorer::new();
    let weights = WeightSet::standard();
    let good = EntityBuilder::new("g").uniform(90.0).build();
    let poor = EntityBuilder::new("p").uniform(60.0).build();
    let g = scorer.calculate(&good.scores, &weights, "weighted_sum").unwrap();
    let p = scorer.calculate(&poor.scores, &weights, "weighted_sum").unwrap();

    assert!(matches!(compare_results(&g, &p), Comparison::FirstBetter(d) if (d - 30.0).abs() < 1e-6));
    assert!(matches!(compare_results(&p, &g), Comparison::SecondBetter(d) if (d - 30.0).abs() < 1e-6));
    assert!(matches!(compare_results(&g, &g), Comparison::Similar(d) if d == 0.0));
}

struct Seasonal;

impl ContextProvider for Seasonal {
    fn weight_multipliers(
        &self,
        location: &str,
        _timestamp: SystemTime,
    ) -> EngineResult<HashMap<String, f64>> {
        let mut m = HashMap::new();
        if location == "gangnam" {
            m.insert("heating_system".to_string(), 3.0);
            m.insert("sauna_access".to_string(), 2.0);
        }
        Ok(m)
    }
}

struct Registry;

impl DataProvider for Registry {
    fn supplementary_scores(
        &self,
        _entity_id: &str,
        missing: &[Factor],
    ) -> EngineResult<BTreeMap<Factor, ScoreValue>> {
        Ok(missing
            .iter()
            .map(|f| (*f, ScoreValue::from_real(50.0)))
            .collect())
    }
}

#[test]
fn test_contextual_weights_stay_valid() {
    let base = WeightSet::standard();
    let adjusted = contextual_weights(&base, &Seasonal, "gangnam", SystemTime::now()).unwrap();
    assert!(adjusted.get(Factor::HeatingSystem) > base.get(Factor::HeatingSystem));
    assert!(validate_weights(&adjusted).is_ok());

    let untouched = contextual_weights(&base, &Seasonal, "mapo", SystemTime::now()).unwrap();
    assert_eq!(untouched, base);
}

#[test]
fn test_filled_entity_can_be_scored() {
    let mut entity = EntityBuilder::new("sparse")
        .score(Factor::SchoolDistrict, 90.0)
        .build();
    let filled = fill_missing_scores(&mut entity, &Registry).unwrap();
    assert_eq!(filled, 13);
    assert!(entity.scores.missing().is_empty());
    assert_eq!(entity.score(Factor::SchoolDistrict), Some(ScoreValue::from_real(90.0)));

    let result = Scorer::new()
        .calculate(&entity.scores, &WeightSet::standard(), "min_max")
        .unwrap();
    assert_eq!(result.total_score, 50.0);

    assert_eq!(fill_missing_scores(&mut entity, &Registry).unwrap(), 0);
}
