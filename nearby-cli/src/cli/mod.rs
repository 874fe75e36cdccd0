//! Developer command line for the classification and search engine

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{CategoriesCommands, ClassifyCommands, DistanceCommands, SearchCommands};

#[derive(Parser)]
#[command(name = "nearby-cli")]
#[command(about = "Classify directory categories and search nearby listings")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/nearby/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify category labels into domains and routes
    Classify(ClassifyCommands),
    /// List or fuzzy-search taxonomy variants
    Categories(CategoriesCommands),
    /// Great-circle distance between two coordinates
    Distance(DistanceCommands),
    /// Compose static and live results for a label around a coordinate
    Search(SearchCommands),
}
