use clap::Parser;
use tracing::{error, Level};

use dead_liquidity::{
    cli::{run_analyze, run_tokens, AnalyzeArgs, Cli, Commands},
    error::Error,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(args).await,
        Some(Commands::Tokens) => run_tokens(),
        None => run_analyze(AnalyzeArgs::default()).await,
    }
}
