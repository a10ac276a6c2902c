use super::{find_entity, Context};
use crate::reports;
use aptscore::error::EngineResult;
use aptscore::loader::load_entities;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct StrategiesArgs {
    #[arg(short, long)]
    pub entities: String,

    #[arg(long)]
    pub id: String,
}

pub fn run(args: &StrategiesArgs, ctx: &Context) -> EngineResult<()> {
    let entities = load_entities(&args.entities)?;
    let entity = find_entity(&entities, &args.id)?;
    let results = ctx.scorer.calculate_all(&entity.scores, &ctx.weights)?;
    reports::print_strategy_table(entity, &results);
    Ok(())
}
