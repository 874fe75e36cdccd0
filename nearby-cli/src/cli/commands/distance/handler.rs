//! Distance command handler

use anyhow::{Context, Result};
use colored::*;

use super::DistanceCommands;
use crate::geo::{Coordinate, distance_km, format_distance};

pub fn handle_distance_command(args: DistanceCommands) -> Result<()> {
    let from = Coordinate::new(args.lat1, args.lon1).context("Invalid first coordinate")?;
    let to = Coordinate::new(args.lat2, args.lon2).context("Invalid second coordinate")?;

    let km = distance_km(from, to);
    println!("{} → {}", from, to);
    println!("{:.3} km ({})", km, format_distance(km).bright_green());
    Ok(())
}
