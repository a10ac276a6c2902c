use super::Context;
use crate::reports;
use aptscore::error::{EngineError, EngineResult};
use aptscore::loader::load_entities;
use aptscore::ranking::{evaluate_relative, find_similar, rank_entities};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[arg(short, long)]
    pub entities: String,

    /// Entity to evaluate against the rest of the batch.
    #[arg(short, long)]
    pub target: String,
}

pub fn run(args: &CompareArgs, ctx: &Context) -> EngineResult<()> {
    let entities = load_entities(&args.entities)?;
    let summary = rank_entities(&ctx.scorer, &entities, &ctx.weights, &ctx.config.strategy)?;
    let scored = summary.scored();

    let target = scored
        .iter()
        .find(|s| s.id == args.target)
        .ok_or_else(|| EngineError::Config(format!("no entity with id '{}'", args.target)))?;

    let relative = evaluate_relative(target, &scored)?;
    let similar = find_similar(target, &scored, &ctx.config.similarity_criteria());
    reports::print_relative_report(&relative, &similar);
    Ok(())
}
