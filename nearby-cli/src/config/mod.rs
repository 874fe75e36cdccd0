//! Application configuration
//!
//! Loaded once at startup from TOML, then adjusted by environment
//! overrides. Missing sections fall back to defaults.

pub mod search;

pub use search::{SearchConfig, SearchConfigBuilder};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::geo::RadiusPreset;

/// Environment variable overriding `backend.base_url`
pub const ENV_BACKEND_URL: &str = "NEARBY_BACKEND_URL";
/// Environment variable overriding `search.default_radius_km`
pub const ENV_DEFAULT_RADIUS: &str = "NEARBY_DEFAULT_RADIUS_KM";

static GLOBAL_CONFIG: OnceCell<Config> = OnceCell::new();

/// Live search backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the search service, None disables live search
    pub base_url: Option<String>,
    /// Path of the search endpoint below the base URL
    pub search_path: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            search_path: "search".to_string(),
            timeout_secs: 15,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub backend: BackendConfig,
}

impl Config {
    /// `<config dir>/nearby/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nearby").join("config.toml"))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("Failed to parse config TOML")?;
        Ok(config)
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and defaults otherwise. Environment overrides are applied
    /// last and the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::read_file(&default)?,
                _ => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            log::debug!("{} overrides backend.base_url", ENV_BACKEND_URL);
            self.backend.base_url = Some(url.trim().to_string());
        }

        if let Some(raw) = lookup(ENV_DEFAULT_RADIUS) {
            let km: u32 = raw
                .trim()
                .parse()
                .with_context(|| {
                    format!("{} must be a whole number of km, got '{}'", ENV_DEFAULT_RADIUS, raw)
                })?;
            self.search.default_radius = RadiusPreset::try_from(km)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid {}", ENV_DEFAULT_RADIUS))?;
        }

        Ok(())
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        self.search.validate().map_err(anyhow::Error::msg)?;

        if let Some(url) = &self.backend.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("backend.base_url must be an http(s) URL, got '{}'", url);
            }
        }
        if self.backend.timeout_secs == 0 {
            anyhow::bail!("backend.timeout_secs must be greater than zero");
        }

        Ok(())
    }
}

/// Install the process-wide configuration (first call wins)
pub fn init_global(config: Config) -> &'static Config {
    GLOBAL_CONFIG.get_or_init(|| config)
}

/// Process-wide configuration, defaults if never initialized
pub fn global_config() -> &'static Config {
    GLOBAL_CONFIG.get_or_init(Config::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::UnlocatedPolicy;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides() {
        let config = Config::from_toml_str(
            r#"
            [search]
            radius_presets_km = [2, 10, 25]
            default_radius_km = 10
            unlocated = "append-unranked"

            [backend]
            base_url = "https://api.example.com"
            timeout_secs = 4
            "#,
        )
        .unwrap();

        assert_eq!(
            config.search.radius_presets,
            vec![RadiusPreset::Km2, RadiusPreset::Km10, RadiusPreset::Km25]
        );
        assert_eq!(config.search.default_radius, RadiusPreset::Km10);
        assert_eq!(config.search.unlocated, UnlocatedPolicy::AppendUnranked);
        assert_eq!(config.backend.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.backend.search_path, "search");
        assert_eq!(config.backend.timeout(), Duration::from_secs(4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_rejects_unknown_radius() {
        let result = Config::from_toml_str("[search]\ndefault_radius_km = 7\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                (ENV_BACKEND_URL, " http://localhost:8080 "),
                (ENV_DEFAULT_RADIUS, "25"),
            ]))
            .unwrap();
        assert_eq!(config.backend.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.search.default_radius, RadiusPreset::Km25);
    }

    #[test]
    fn test_env_override_errors() {
        let mut config = Config::default();
        assert!(config.apply_overrides(env(&[(ENV_DEFAULT_RADIUS, "five")])).is_err());
        assert!(config.apply_overrides(env(&[(ENV_DEFAULT_RADIUS, "3")])).is_err());

        // Blank URL is ignored
        config.apply_overrides(env(&[(ENV_BACKEND_URL, "  ")])).unwrap();
        assert_eq!(config.backend.base_url, None);
    }

    #[test]
    fn test_validate_backend() {
        let mut config = Config::default();
        config.backend.base_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());

        config.backend.base_url = Some("https://example.com".to_string());
        config.backend.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = Config::load(Some(Path::new("/definitely/not/here/config.toml")));
        assert!(result.is_err());
    }
}
