use super::Context;
use crate::reports;
use aptscore::error::EngineResult;
use aptscore::loader::load_entities;
use aptscore::ranking::rank_entities;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    #[arg(short, long)]
    pub entities: String,

    /// Show only the top N.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print the full summary as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &RankArgs, ctx: &Context) -> EngineResult<()> {
    let entities = load_entities(&args.entities)?;
    let summary = rank_entities(&ctx.scorer, &entities, &ctx.weights, &ctx.config.strategy)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        reports::print_ranking_table(&summary, args.limit.unwrap_or(usize::MAX));
    }
    Ok(())
}
