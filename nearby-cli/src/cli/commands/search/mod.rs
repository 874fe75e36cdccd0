pub mod handler;

use clap::Args;

pub use handler::handle_search_command;

#[derive(Args)]
pub struct SearchCommands {
    /// Category label to search for
    pub label: String,

    /// Latitude of the search origin
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the search origin
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Radius in km (one of the configured presets)
    #[arg(long)]
    pub radius: Option<u32>,

    /// Search backend base URL, overriding the config file
    #[arg(long)]
    pub backend: Option<String>,

    /// Sort live results by distance instead of backend order
    #[arg(long)]
    pub nearest_first: bool,
}
