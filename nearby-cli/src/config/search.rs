//! Search configuration with builder pattern
//!
//! Radius presets offered to users, the radius used before the user picks
//! one, and what to do with listings that carry no coordinates.

use serde::{Deserialize, Serialize};

use crate::geo::{RadiusPreset, UnlocatedPolicy};

/// Radius and filtering options for nearby search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Presets offered in the radius picker, in display order
    #[serde(rename = "radius_presets_km")]
    pub radius_presets: Vec<RadiusPreset>,
    /// Radius used when a screen opens
    #[serde(rename = "default_radius_km")]
    pub default_radius: RadiusPreset,
    /// Live listings without coordinates
    pub unlocated: UnlocatedPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_presets: RadiusPreset::all_variants().to_vec(),
            default_radius: RadiusPreset::Km5,
            unlocated: UnlocatedPolicy::Exclude,
        }
    }
}

impl SearchConfig {
    /// Create a new builder for SearchConfig
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }

    /// Check if a radius is offered to users
    pub fn is_offered(&self, radius: RadiusPreset) -> bool {
        self.radius_presets.contains(&radius)
    }

    /// Validate preset list and default
    pub fn validate(&self) -> Result<(), String> {
        if self.radius_presets.is_empty() {
            return Err("search.radius_presets_km must not be empty".to_string());
        }
        if !self.is_offered(self.default_radius) {
            return Err(format!(
                "search.default_radius_km ({}) is not one of the configured presets",
                self.default_radius.whole_km()
            ));
        }
        Ok(())
    }
}

/// Builder for SearchConfig
#[derive(Debug)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Set the offered presets
    pub fn radius_presets(mut self, presets: Vec<RadiusPreset>) -> Self {
        self.config.radius_presets = presets;
        self
    }

    /// Set the radius used when a screen opens
    pub fn default_radius(mut self, radius: RadiusPreset) -> Self {
        self.config.default_radius = radius;
        self
    }

    /// Set handling of listings without coordinates
    pub fn unlocated(mut self, policy: UnlocatedPolicy) -> Self {
        self.config.unlocated = policy;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
