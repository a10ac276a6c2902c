mod common;

use aptscore::scorer::{CalculationPipeline, Method, Step, StepCondition};
use aptscore::{Factor, ScoreSet, Scorer, WeightSet};
use common::EntityBuilder;

#[test]
fn test_family_pipeline_through_scorer() {
    let entity = EntityBuilder::new("fam")
        .score(Factor::SchoolDistrict, 90.0)
        .score(Factor::ApartmentSize, 80.0)
        .score(Factor::MaintenanceFee, 70.0)
        .score(Factor::TransportationAccess, 80.0)
        .build();
    let result = Scorer::new()
        .calculate_with_pipeline(
            &entity.scores,
            &WeightSet::standard(),
            &CalculationPipeline::family(),
        )
        .unwrap();

    // 36 + 30.4 = 66.4, plus the 0.4 transport bonus
    assert!((result.total_score - 66.8).abs() < 1e-9);
    assert_eq!(result.method, Method::Pipeline("family".to_string()));
    assert_eq!(result.method.to_string(), "pipeline:family");
    assert!(result.factors.values().all(|fs| fs.weighted == 0.0));
    assert_eq!(result.factor(Factor::SchoolDistrict).raw.to_real(), 90.0);
}

#[test]
fn test_pipeline_still_validates_inputs() {
    let scores = ScoreSet::new().with(Factor::SchoolDistrict, 80.0);
    let err = Scorer::new()
        .calculate_with_pipeline(&scores, &WeightSet::new(), &CalculationPipeline::family())
        .unwrap_err();
    assert_eq!(err.field(), Some("total_weight"));
}

#[test]
fn test_steps_can_read_weights() {
    let pipeline = CalculationPipeline::new("weighted_school")
        .with_step(Step::new("school", 1, |s: &ScoreSet, w: &WeightSet| {
            s.get(Factor::SchoolDistrict).to_real() * w.get(Factor::SchoolDistrict).to_real()
        }))
        .with_step(
            Step::new("floor", 2, |_: &ScoreSet, _: &WeightSet| 100.0)
                .when(StepCondition::TotalAtLeast(50.0)),
        );
    let scores = ScoreSet::new().with(Factor::SchoolDistrict, 80.0);
    let weights = WeightSet::new()
        .with(Factor::SchoolDistrict, 0.5)
        .with(Factor::CrimeRate, 0.5);

    let result = Scorer::new()
        .calculate_with_pipeline(&scores, &weights, &pipeline)
        .unwrap();
    // 40 never reaches the 50 threshold
    assert_eq!(result.total_score, 40.0);
    assert_eq!(pipeline.steps().len(), 2);
}
