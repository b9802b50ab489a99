use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port to listen on. Overridden by the PORT environment variable.
    #[serde(default = "Config::default_port")]
    pub port: u16,
    /// Allowed CORS origins. Required unless cors_permissive is true.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Explicitly allow all origins (development only). Defaults to false.
    #[serde(default)]
    pub cors_permissive: bool,
    /// Flight cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Configuration for the flight cache and the live-data fetch
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Minutes before cached flight data is considered stale (default: 30)
    #[serde(default = "CacheConfig::default_ttl_minutes")]
    pub ttl_minutes: u64,
    /// Daily cap on attempted AviationStack calls (default: 50)
    #[serde(default = "CacheConfig::default_daily_api_limit")]
    pub daily_api_limit: u32,
    /// Interval in minutes between background refresh cycles (default: 30)
    #[serde(default = "CacheConfig::default_refresh_interval_minutes")]
    pub refresh_interval_minutes: u64,
    /// Departure airport queried on the live API (default: "BOM").
    /// The upstream call is route-agnostic; per-route filtering happens
    /// against the cached set.
    #[serde(default = "CacheConfig::default_fetch_airport")]
    pub fetch_airport: String,
    /// Maximum number of flights requested per live call (default: 30)
    #[serde(default = "CacheConfig::default_fetch_limit")]
    pub fetch_limit: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: Self::default_ttl_minutes(),
            daily_api_limit: Self::default_daily_api_limit(),
            refresh_interval_minutes: Self::default_refresh_interval_minutes(),
            fetch_airport: Self::default_fetch_airport(),
            fetch_limit: Self::default_fetch_limit(),
        }
    }
}

impl CacheConfig {
    fn default_ttl_minutes() -> u64 {
        30
    }
    fn default_daily_api_limit() -> u32 {
        50
    }
    fn default_refresh_interval_minutes() -> u64 {
        30
    }
    fn default_fetch_airport() -> String {
        "BOM".to_string()
    }
    fn default_fetch_limit() -> u32 {
        30
    }
}

impl Config {
    fn default_port() -> u16 {
        5050
    }

    /// Load config from a YAML file, falling back to defaults when the file
    /// does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Listen port, honoring the PORT environment variable over the file value.
    pub fn resolved_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: Self::default_port(),
            cors_origins: Vec::new(),
            cors_permissive: false,
            cache: CacheConfig::default(),
        }
    }
}

/// API credentials, environment-provided only (never in the config file).
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub aviationstack_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            aviationstack_api_key: env_non_empty("AVIATIONSTACK_API_KEY"),
            openrouter_api_key: env_non_empty("OPENROUTER_API_KEY"),
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load_or_default("does-not-exist.yaml").unwrap();
        assert_eq!(config.port, 5050);
        assert_eq!(config.cache.ttl_minutes, 30);
        assert_eq!(config.cache.daily_api_limit, 50);
        assert_eq!(config.cache.fetch_airport, "BOM");
        assert!(!config.cors_permissive);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: Config =
            serde_yaml::from_str("port: 8080\ncache:\n  ttl_minutes: 5\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache.ttl_minutes, 5);
        assert_eq!(config.cache.daily_api_limit, 50);
    }
}
