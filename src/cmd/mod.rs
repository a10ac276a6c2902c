pub mod compare;
pub mod rank;
pub mod score;
pub mod strategies;

use aptscore::config::EngineConfig;
use aptscore::error::{EngineError, EngineResult};
use aptscore::scorer::CalculationPipeline;
use aptscore::{Entity, Scorer, WeightSet};

/// Everything a subcommand needs once the global options are resolved.
pub struct Context {
    pub scorer: Scorer,
    pub config: EngineConfig,
    pub weights: WeightSet,
}

pub fn find_entity<'a>(entities: &'a [Entity], id: &str) -> EngineResult<&'a Entity> {
    entities
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| EngineError::Config(format!("no entity with id '{}'", id)))
}

pub fn named_pipeline(name: &str) -> EngineResult<CalculationPipeline> {
    match name {
        "family" => Ok(CalculationPipeline::family()),
        other => Err(EngineError::Config(format!("unknown pipeline '{}'", other))),
    }
}
