use anyhow::Result;
use clap::Parser;

use nearby_cli::cli::commands::{
    categories::handle_categories_command, classify::handle_classify_command,
    distance::handle_distance_command, search::handle_search_command,
};
use nearby_cli::cli::{Cli, Commands};
use nearby_cli::config::{Config, init_global};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::load(cli.config.as_deref())?;
    init_global(config);

    match cli.command {
        Commands::Classify(args) => handle_classify_command(args),
        Commands::Categories(args) => handle_categories_command(args),
        Commands::Distance(args) => handle_distance_command(args),
        Commands::Search(args) => handle_search_command(args).await,
    }
}
