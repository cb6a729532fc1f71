//! Configuration management for HarvestGuard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with HG_ prefix
//!
//! The weather API key may also come from `GOOGLE_MAPS_API_KEY` when no
//! `HG__WEATHER__API_KEY` is set.

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Default upstream for the days-lookup forecast endpoint
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://weather.googleapis.com/v1";

/// Conventional variable holding the Google Maps Platform key
pub const GOOGLE_MAPS_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Account configuration
    pub auth: AuthConfig,

    /// Local storage configuration
    pub storage: StorageConfig,

    /// Freshness scanner configuration
    pub scanner: ScannerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Forecast API base URL
    pub api_endpoint: String,

    /// Forecast API key. Without one, forecasts are synthetic.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl WeatherConfig {
    /// The API key, treating an empty value as absent
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Use `fallback` as the key when none is configured
    pub fn fill_missing_key(&mut self, fallback: Option<String>) {
        if self.credential().is_none() {
            self.api_key = fallback.filter(|k| !k.trim().is_empty());
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// bcrypt work factor for stored passwords
    pub bcrypt_cost: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON document per storage key
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScannerConfig {
    /// Simulated analysis time in milliseconds
    pub analysis_delay_ms: u64,
}

impl ScannerConfig {
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("HG_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", DEFAULT_WEATHER_ENDPOINT)?
            .set_default("auth.bcrypt_cost", i64::from(bcrypt::DEFAULT_COST))?
            .set_default("storage.data_dir", "data")?
            .set_default("scanner.analysis_delay_ms", 2000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (HG_ prefix)
            .add_source(
                Environment::with_prefix("HG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config
            .weather
            .fill_missing_key(std::env::var(GOOGLE_MAPS_KEY_VAR).ok());
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig {
                api_endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
                api_key: None,
            },
            auth: AuthConfig {
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("data"),
            },
            scanner: ScannerConfig {
                analysis_delay_ms: 2000,
            },
        }
    }
}
