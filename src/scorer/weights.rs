use crate::error::{EngineError, EngineResult};
use crate::factors::{Factor, FactorTable};
use crate::fixed::{ScoreValue, Weight, SCALE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

// Sums to 1.10; `WeightSet::standard` normalizes it.
const STANDARD_WEIGHTS: [(Factor, f64); 14] = [
    (Factor::FloorLevel, 0.08),
    (Factor::DistanceToStation, 0.15),
    (Factor::ElevatorPresence, 0.07),
    (Factor::ConstructionYear, 0.10),
    (Factor::ConstructionCompany, 0.08),
    (Factor::ApartmentSize, 0.08),
    (Factor::NearbyAmenities, 0.10),
    (Factor::TransportationAccess, 0.12),
    (Factor::SchoolDistrict, 0.08),
    (Factor::CrimeRate, 0.06),
    (Factor::GreenSpaceRatio, 0.04),
    (Factor::Parking, 0.06),
    (Factor::MaintenanceFee, 0.05),
    (Factor::HeatingSystem, 0.03),
];

/// A weight for every factor. Factors never set carry zero weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightSet(FactorTable<Weight>);

impl WeightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine's built-in weighting, normalized to sum to one.
    pub fn standard() -> Self {
        normalize_weights(&Self::from_reals(STANDARD_WEIGHTS))
    }

    pub fn from_reals<I: IntoIterator<Item = (Factor, f64)>>(entries: I) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(factor, w)| (factor, Weight::from_real(w)))
                .collect(),
        )
    }

    pub fn get(&self, factor: Factor) -> Weight {
        self.0.get(factor)
    }

    pub fn set(&mut self, factor: Factor, weight: Weight) {
        self.0[factor] = weight;
    }

    #[must_use]
    pub fn with(mut self, factor: Factor, weight: f64) -> Self {
        self.set(factor, Weight::from_real(weight));
        self
    }

    /// Sum of raw weights. Widened so that out-of-range entries cannot overflow.
    pub fn total(&self) -> i64 {
        self.0.values().map(|w| i64::from(w.raw())).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, Weight)> + '_ {
        self.0.iter().map(|(factor, w)| (factor, *w))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let weights: Self = serde_json::from_str(&content)?;
        info!(
            "Loaded weights from {} (total {:.3})",
            path.display(),
            weights.total() as f64 / f64::from(SCALE)
        );
        Ok(weights)
    }

    /// Replaces the listed entries, leaving every other factor as loaded.
    pub fn merge_overrides(&mut self, overrides: &[(Factor, Weight)]) {
        for &(factor, weight) in overrides {
            debug!("Weight override {} = {}", factor, weight);
            self.set(factor, weight);
        }
    }
}

/// Raw factor scores for one entity. Absent factors read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Factor, ScoreValue>",
    into = "BTreeMap<Factor, ScoreValue>"
)]
pub struct ScoreSet(FactorTable<Option<ScoreValue>>);

impl ScoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reals<I: IntoIterator<Item = (Factor, f64)>>(entries: I) -> Self {
        let mut set = Self::new();
        for (factor, score) in entries {
            set.set(factor, ScoreValue::from_real(score));
        }
        set
    }

    pub fn set(&mut self, factor: Factor, score: ScoreValue) {
        self.0[factor] = Some(score);
    }

    #[must_use]
    pub fn with(mut self, factor: Factor, score: f64) -> Self {
        self.set(factor, ScoreValue::from_real(score));
        self
    }

    pub fn get(&self, factor: Factor) -> ScoreValue {
        self.0.get(factor).unwrap_or(ScoreValue::ZERO)
    }

    pub fn is_present(&self, factor: Factor) -> bool {
        self.0[factor].is_some()
    }

    pub fn missing(&self) -> Vec<Factor> {
        self.0
            .iter()
            .filter(|(_, s)| s.is_none())
            .map(|(factor, _)| factor)
            .collect()
    }

    /// Every factor in order, absent ones as zero.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, ScoreValue)> + '_ {
        self.0
            .iter()
            .map(|(factor, s)| (factor, s.unwrap_or(ScoreValue::ZERO)))
    }

    pub fn present(&self) -> impl Iterator<Item = (Factor, ScoreValue)> + '_ {
        self.0
            .iter()
            .filter_map(|(factor, s)| s.map(|score| (factor, score)))
    }
}

impl From<BTreeMap<Factor, ScoreValue>> for ScoreSet {
    fn from(map: BTreeMap<Factor, ScoreValue>) -> Self {
        Self(map.into_iter().map(|(f, s)| (f, Some(s))).collect())
    }
}

impl From<ScoreSet> for BTreeMap<Factor, ScoreValue> {
    fn from(set: ScoreSet) -> Self {
        set.present().collect()
    }
}

/// Checks every weight is within `[0, SCALE]`, then that the total is `SCALE ± 1`.
pub fn validate_weights(weights: &WeightSet) -> EngineResult<()> {
    for (factor, weight) in weights.iter() {
        if !weight.is_in_range() {
            return Err(EngineError::validation(
                factor.name(),
                format!("weight {} is outside [0, 1]", weight.to_real()),
            ));
        }
    }

    let total = weights.total();
    let scale = i64::from(SCALE);
    if total < scale - 1 || total > scale + 1 {
        return Err(EngineError::validation(
            "total_weight",
            format!(
                "weights sum to {:.3}, expected 1.000",
                total as f64 / f64::from(SCALE)
            ),
        ));
    }
    Ok(())
}

pub fn validate_scores(scores: &ScoreSet) -> EngineResult<()> {
    for (factor, score) in scores.iter() {
        if !score.is_in_range() {
            return Err(EngineError::validation(
                factor.name(),
                format!("score {} is outside [0, 100]", score.to_real()),
            ));
        }
    }
    Ok(())
}

/// Rescales every entry proportionally so the set sums to (approximately) one.
///
/// Each entry rounds half up independently; the result can miss `SCALE` by up
/// to one unit per entry. A zero-total set is returned unchanged.
pub fn normalize_weights(weights: &WeightSet) -> WeightSet {
    let total = weights.total();
    if total == 0 {
        return *weights;
    }

    let scale = i64::from(SCALE);
    let normalized = WeightSet(weights.0.map(|_, w| {
        Weight::from_raw(((i64::from(w.raw()) * scale + total / 2) / total) as i32)
    }));
    debug!(
        "Normalized weights: total {} -> {}",
        total,
        normalized.total()
    );
    normalized
}
