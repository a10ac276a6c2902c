pub mod analysis;
pub mod config;
pub mod entity;
pub mod error;
pub mod factors;
pub mod fixed;
pub mod loader;
pub mod providers;
pub mod ranking;
pub mod scorer;

pub use crate::entity::Entity;
pub use crate::error::{EngineError, EngineResult};
pub use crate::factors::{Factor, FactorClassification, FactorKind};
pub use crate::fixed::{ScoreValue, Weight, SCALE};
pub use crate::scorer::{ScoreResult, ScoreSet, Scorer, WeightSet};
// cmd and reports belong to the binary (main.rs).
