pub mod handler;

use clap::Args;

pub use handler::handle_distance_command;

#[derive(Args)]
pub struct DistanceCommands {
    /// Latitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lat1: f64,
    /// Longitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lon1: f64,
    /// Latitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lat2: f64,
    /// Longitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lon2: f64,
}
