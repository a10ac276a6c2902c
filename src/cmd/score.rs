use super::{find_entity, named_pipeline, Context};
use crate::reports;
use aptscore::analysis::analyze;
use aptscore::error::{EngineError, EngineResult};
use aptscore::loader::load_entities;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[arg(short, long)]
    pub entities: String,

    /// Only score this entity.
    #[arg(long)]
    pub id: Option<String>,

    /// Score with a named pipeline (`family`) instead of the strategy.
    #[arg(long)]
    pub pipeline: Option<String>,
}

pub fn run(args: &ScoreArgs, ctx: &Context) -> EngineResult<()> {
    let entities = load_entities(&args.entities)?;
    let selected = match &args.id {
        Some(id) => vec![find_entity(&entities, id)?],
        None => entities.iter().collect(),
    };
    let pipeline = args.pipeline.as_deref().map(named_pipeline).transpose()?;

    for entity in selected {
        let result = match &pipeline {
            Some(p) => ctx
                .scorer
                .calculate_with_pipeline(&entity.scores, &ctx.weights, p),
            None => ctx
                .scorer
                .calculate(&entity.scores, &ctx.weights, &ctx.config.strategy),
        }
        .map_err(|e| EngineError::Entity {
            id: entity.id.clone(),
            source: Box::new(e),
        })?;

        let analysis = analyze(&result, ctx.scorer.classification());
        reports::print_score_report(entity, &result, &analysis);
    }
    Ok(())
}
