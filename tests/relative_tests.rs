mod common;

use aptscore::ranking::{
    evaluate_all, evaluate_relative, find_similar, rank_entities, GroupCriteria, ScoredEntity,
    SimilarityCriteria,
};
use aptscore::{EngineError, Scorer, WeightSet};
use common::EntityBuilder;
use rstest::rstest;

fn batch(scores: &[(&str, &str, f64)]) -> Vec<ScoredEntity> {
    scores
        .iter()
        .map(|(id, loc, s)| ScoredEntity::new(id, loc, *s))
        .collect()
}

#[rstest]
#[case(0, 1, 0.0)] // 95 is the top
#[case(2, 3, 50.0)] // 80: above 70 and 60
#[case(4, 5, 100.0)] // 60 is the bottom
fn test_group_rank_and_rank_percentile(
    #[case] index: usize,
    #[case] rank: usize,
    #[case] rank_percentile: f64,
) {
    let group = batch(&[
        ("a", "gangnam", 95.0),
        ("b", "gangnam", 85.0),
        ("c", "mapo", 80.0),
        ("d", "mapo", 70.0),
        ("e", "jongno", 60.0),
    ]);
    let r = evaluate_relative(&group[index], &group).unwrap();
    assert_eq!(r.group_rank, rank);
    assert_eq!(r.comparison.rank_percentile, rank_percentile);
    assert_eq!(
        r.comparison.higher_count + r.comparison.lower_count,
        group.len() - 1
    );
}

#[test]
fn test_ties_share_group_rank() {
    let group = batch(&[("a", "x", 90.0), ("b", "x", 80.0), ("c", "x", 80.0)]);
    let rb = evaluate_relative(&group[1], &group).unwrap();
    let rc = evaluate_relative(&group[2], &group).unwrap();
    assert_eq!(rb.group_rank, 2);
    assert_eq!(rc.group_rank, 2);
    assert_eq!(rb.comparison.similar_count, 1);
}

#[test]
fn test_target_outside_group_is_still_measured() {
    let group = batch(&[("a", "x", 40.0), ("b", "x", 60.0)]);
    let outsider = ScoredEntity::new("z", "x", 50.0);
    let r = evaluate_relative(&outsider, &group).unwrap();
    assert_eq!(r.percentile_rank, 50.0);
    assert_eq!(r.comparison.higher_count, 1);
    assert_eq!(r.comparison.lower_count, 1);
    assert_eq!(r.comparison.rank_percentile, 50.0);
    assert_eq!(r.distribution.count, 2);
}

#[test]
fn test_entities_outside_selected_group_stay_bounded() {
    let entities = batch(&[("a", "x", 90.0), ("b", "x", 80.0), ("low", "x", 10.0)]);
    let criteria = GroupCriteria {
        min_score: 50.0,
        ..Default::default()
    };
    let results = evaluate_all(&entities, &criteria).unwrap();
    assert_eq!(results.len(), 3);

    let low = results.iter().find(|r| r.entity_id == "low").unwrap();
    assert_eq!(low.distribution.count, 2);
    assert_eq!(low.comparison.rank_percentile, 100.0);
    assert!(results
        .iter()
        .all(|r| (0.0..=100.0).contains(&r.comparison.rank_percentile)));
}

#[test]
fn test_ranking_feeds_relative_evaluation() {
    let entities = vec![
        EntityBuilder::new("a").location("gangnam").uniform(88.0).build(),
        EntityBuilder::new("b").location("mapo").uniform(72.0).build(),
        EntityBuilder::new("c").location("gangnam").uniform(85.0).build(),
        EntityBuilder::new("d").location("jongno").uniform(50.0).build(),
    ];
    let summary = rank_entities(
        &Scorer::new(),
        &entities,
        &WeightSet::standard(),
        "weighted_sum",
    )
    .unwrap();
    let scored = summary.scored();

    let target = scored.iter().find(|s| s.id == "c").unwrap();
    let r = evaluate_relative(target, &scored).unwrap();
    assert_eq!(r.group_rank, 2);
    assert!((r.distribution.mean - 73.75).abs() < 1e-6);

    let similar = find_similar(target, &scored, &SimilarityCriteria::default());
    let ids: Vec<&str> = similar.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
}

#[test]
fn test_find_similar_falls_back_on_degenerate_criteria() {
    let target = ScoredEntity::new("t", "x", 70.0);
    let candidates = batch(&[("t", "x", 70.0), ("n", "x", 71.0), ("f", "x", 95.0)]);
    let criteria = SimilarityCriteria {
        score_range: 0.0,
        max_results: 0,
        ..Default::default()
    };
    let similar = find_similar(&target, &candidates, &criteria);
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].id, "n");
}

#[test]
fn test_evaluate_all_unlimited_group() {
    let entities = batch(&[("a", "x", 90.0), ("b", "x", 70.0), ("c", "x", 50.0)]);
    let results = evaluate_all(&entities, &GroupCriteria::default()).unwrap();
    assert_eq!(results.len(), 3);
    let ranks: Vec<usize> = results.iter().map(|r| r.group_rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn test_evaluate_all_rejects_empty_input() {
    let err = evaluate_all(&[], &GroupCriteria::default()).unwrap_err();
    assert!(matches!(err, EngineError::Evaluation(_)));
}
