//! Device location capability
//!
//! The real capability lives outside this crate. Screens receive it as a
//! `LocationProvider` so tests and the CLI can stand in for the device.

use async_trait::async_trait;

use crate::geo::Coordinate;

/// Why no user coordinate is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The user refused the location permission
    PermissionDenied,
    /// The device could not produce a fix
    Unavailable(String),
}

impl LocationError {
    /// Banner text shown above the static section
    pub fn banner(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => {
                "Location permission denied. Showing featured listings only."
            }
            LocationError::Unavailable(_) => {
                "Could not determine your location. Showing featured listings only."
            }
        }
    }
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "Location permission denied"),
            LocationError::Unavailable(reason) => write!(f, "Location unavailable: {}", reason),
        }
    }
}

impl std::error::Error for LocationError {}

/// Source of the user's current coordinate
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// Always reports the same coordinate
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Always fails with the given error
#[derive(Debug, Clone)]
pub struct DeniedLocation(pub LocationError);

#[async_trait]
impl LocationProvider for DeniedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Err(self.0.clone())
    }
}
