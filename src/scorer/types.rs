use crate::factors::{Factor, FactorTable};
use crate::fixed::{ScoreValue, Weight};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// What produced a [`ScoreResult`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Strategy(String),
    Pipeline(String),
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strategy(id) => write!(f, "{}", id),
            Self::Pipeline(name) => write!(f, "pipeline:{}", name),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub raw: ScoreValue,
    pub weight: Weight,
    /// Strategy-specific contribution; its meaning differs per strategy.
    pub weighted: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64,
    pub factors: FactorTable<FactorScore>,
    pub method: Method,
}

impl ScoreResult {
    pub fn factor(&self, factor: Factor) -> &FactorScore {
        &self.factors[factor]
    }

    pub fn grade(&self) -> Grade {
        Grade::from_score(self.total_score)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::A,
            s if s >= 80.0 => Self::B,
            s if s >= 70.0 => Self::C,
            s if s >= 60.0 => Self::D,
            _ => Self::F,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_score(90.0), Grade::A);
        assert_eq!(Grade::from_score(89.99), Grade::B);
        assert_eq!(Grade::from_score(70.0), Grade::C);
        assert_eq!(Grade::from_score(60.0), Grade::D);
        assert_eq!(Grade::from_score(59.9), Grade::F);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Strategy("min_max".into()).to_string(), "min_max");
        assert_eq!(Method::Pipeline("family".into()).to_string(), "pipeline:family");
    }
}
