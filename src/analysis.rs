//! Post-hoc reading of a [`ScoreResult`]: strengths, weaknesses and the
//! factors that moved the total most.

use crate::factors::{Factor, FactorClassification, FactorKind};
use crate::fixed::{apply_weight, ScoreValue, Weight, SCALE};
use crate::scorer::ScoreResult;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STRENGTH_THRESHOLD: f64 = 80.0;
pub const WEAKNESS_THRESHOLD: f64 = 60.0;
pub const BASELINE_SCORE: f64 = 75.0;
pub const TOP_FACTOR_COUNT: usize = 5;
pub const COMPARISON_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorImpact {
    pub factor: Factor,
    pub score: ScoreValue,
    pub weight: Weight,
    pub impact: ScoreValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAnalysis {
    pub strengths: Vec<Factor>,
    pub weaknesses: Vec<Factor>,
    pub top_factors: Vec<FactorImpact>,
    pub improvement_tips: Vec<String>,
    /// Total minus [`BASELINE_SCORE`].
    pub comparison_to_baseline: f64,
    pub internal_score: f64,
    pub external_score: f64,
}

/// Factors scoring exactly zero are treated as unrated and ignored.
pub fn analyze(result: &ScoreResult, classification: &FactorClassification) -> ScoreAnalysis {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut impacts = Vec::new();

    for (factor, fs) in result.factors.iter() {
        if fs.raw == ScoreValue::ZERO {
            continue;
        }
        let raw = fs.raw.to_real();
        if raw >= STRENGTH_THRESHOLD {
            strengths.push(factor);
        } else if raw <= WEAKNESS_THRESHOLD {
            weaknesses.push(factor);
        }
        impacts.push(FactorImpact {
            factor,
            score: fs.raw,
            weight: fs.weight,
            impact: apply_weight(fs.raw, fs.weight),
        });
    }

    impacts.sort_by(|a, b| b.impact.cmp(&a.impact));
    impacts.truncate(TOP_FACTOR_COUNT);

    let improvement_tips = weaknesses
        .iter()
        .filter_map(|f| improvement_tip(*f))
        .map(str::to_string)
        .collect();

    ScoreAnalysis {
        strengths,
        weaknesses,
        top_factors: impacts,
        improvement_tips,
        comparison_to_baseline: result.total_score - BASELINE_SCORE,
        internal_score: kind_score(result, classification, FactorKind::Internal),
        external_score: kind_score(result, classification, FactorKind::External),
    }
}

/// Weighted average of the raw scores of one kind of factor; 0 when none of
/// them carries weight.
pub fn kind_score(result: &ScoreResult, classification: &FactorClassification, kind: FactorKind) -> f64 {
    let (sum, weight) = classification
        .factors_of(kind)
        .into_iter()
        .map(|f| result.factor(f))
        .fold((0i64, 0i64), |(sum, weight), fs| {
            (
                sum + i64::from(apply_weight(fs.raw, fs.weight).raw()),
                weight + i64::from(fs.weight.raw()),
            )
        });
    if weight == 0 {
        return 0.0;
    }
    (sum as f64 / f64::from(SCALE)) / (weight as f64 / f64::from(SCALE))
}

pub fn improvement_tip(factor: Factor) -> Option<&'static str> {
    match factor {
        Factor::FloorLevel => Some("Consider units closer to the middle floors"),
        Factor::DistanceToStation => Some("Look for units nearer a station"),
        Factor::ElevatorPresence => Some("Prefer buildings with an elevator"),
        Factor::ConstructionYear => Some("Consider more recently built buildings"),
        Factor::ConstructionCompany => Some("Consider buildings from a reputable builder"),
        Factor::ApartmentSize => Some("Look for a better-sized unit"),
        Factor::SchoolDistrict => Some("Consider areas with a stronger school district"),
        Factor::CrimeRate => Some("Look at safer neighbourhoods"),
        Factor::MaintenanceFee => Some("Look for a more reasonable maintenance fee"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Comparison {
    FirstBetter(f64),
    SecondBetter(f64),
    Similar(f64),
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstBetter(d) => write!(f, "first option scores {:.1} points higher", d),
            Self::SecondBetter(d) => write!(f, "second option scores {:.1} points higher", d),
            Self::Similar(d) => write!(f, "options score about the same (difference {:.1})", d),
        }
    }
}

/// Differences beyond [`COMPARISON_THRESHOLD`] points name a winner; the
/// carried difference is always non-negative for a winner.
pub fn compare_results(first: &ScoreResult, second: &ScoreResult) -> Comparison {
    let diff = first.total_score - second.total_score;
    if diff > COMPARISON_THRESHOLD {
        Comparison::FirstBetter(diff)
    } else if diff < -COMPARISON_THRESHOLD {
        Comparison::SecondBetter(-diff)
    } else {
        Comparison::Similar(diff)
    }
}
