//! Great-circle distance, display formatting and radius filtering

pub mod distance;
pub mod radius;

pub use distance::{EARTH_RADIUS_KM, distance_km, format_distance};
pub use radius::{
    Located, Placed, RadiusPreset, UnlocatedPolicy, filter_within_radius, rank_by_distance,
};

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Error constructing a coordinate from raw values
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    NotFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl std::fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateError::NotFinite => write!(f, "Coordinate values must be finite numbers"),
            CoordinateError::LatitudeOutOfRange(lat) => {
                write!(f, "Latitude {} is outside [-90, 90]", lat)
            }
            CoordinateError::LongitudeOutOfRange(lon) => {
                write!(f, "Longitude {} is outside [-180, 180]", lon)
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

impl Coordinate {
    /// Create a validated coordinate
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build from optional parts, dropping anything invalid
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}
