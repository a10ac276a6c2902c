use crate::factors::Factor;
use crate::fixed::ScoreValue;
use crate::scorer::weights::ScoreSet;
use serde::{Deserialize, Serialize};

/// A scored unit: identity, a location label and its raw factor scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub scores: ScoreSet,
}

impl Entity {
    pub fn new(id: &str, name: &str, location: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            scores: ScoreSet::new(),
        }
    }

    pub fn with_score(mut self, factor: Factor, score: f64) -> Self {
        self.scores.set(factor, ScoreValue::from_real(score));
        self
    }

    pub fn with_scores(mut self, scores: ScoreSet) -> Self {
        self.scores = scores;
        self
    }

    pub fn set_score(&mut self, factor: Factor, score: ScoreValue) {
        self.scores.set(factor, score);
    }

    pub fn score(&self, factor: Factor) -> Option<ScoreValue> {
        self.scores
            .is_present(factor)
            .then(|| self.scores.get(factor))
    }
}
