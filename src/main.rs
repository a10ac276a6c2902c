use aptscore::config::EngineConfig;
use aptscore::error::EngineResult;
use aptscore::Scorer;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON engine configuration. Flags given on the command line win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[command(flatten)]
    engine: EngineConfig,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,

    #[arg(global = true, short, long, default_value_t = false, conflicts_with = "debug")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score entities and show the per-factor breakdown.
    Score(cmd::score::ScoreArgs),
    /// Rank a batch of entities.
    Rank(cmd::rank::RankArgs),
    /// Evaluate one entity against the rest of the batch.
    Compare(cmd::compare::CompareArgs),
    /// Score one entity under every strategy.
    Strategies(cmd::strategies::StrategiesArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, matches: &ArgMatches) -> EngineResult<()> {
    let config = match &cli.config {
        Some(path) => {
            info!("📂 Loading config: {}", path);
            let mut file_config = EngineConfig::load_from_file(path)?;
            file_config.merge_from_cli(&cli.engine, matches);
            file_config
        }
        None => cli.engine.clone(),
    };

    let weights = config.resolve_weights()?;
    let ctx = cmd::Context {
        scorer: Scorer::new(),
        config,
        weights,
    };

    match &cli.command {
        Commands::Score(args) => cmd::score::run(args, &ctx),
        Commands::Rank(args) => cmd::rank::run(args, &ctx),
        Commands::Compare(args) => cmd::compare::run(args, &ctx),
        Commands::Strategies(args) => cmd::strategies::run(args, &ctx),
    }
}
