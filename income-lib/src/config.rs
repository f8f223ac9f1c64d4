use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::{env, fs};
use tracing::level_filters::LevelFilter;

#[derive(Deserialize, Debug, Clone)]
pub struct TelemetryConfig {
    pub endpoint: String,
    #[serde(default = "default_header_name")]
    pub header_name: String,
    pub api_key: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    pub telemetry: Option<TelemetryConfig>,
}

fn default_header_name() -> String {
    "x-honeycomb-team".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_max_pool_size() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        Config::from_toml(&config)
    }

    pub fn from_toml(config: &str) -> Result<Config, anyhow::Error> {
        toml::from_str(config).with_context(|| "Unable to parse config")
    }

    pub fn from_env() -> Result<Config, anyhow::Error> {
        let database_url = read_env("DATABASE_URL")?;
        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| default_bind_address());
        let max_pool_size = match env::var("MAX_POOL_SIZE") {
            Ok(size) => size.parse().context("Unable to parse MAX_POOL_SIZE value")?,
            Err(_) => default_max_pool_size(),
        };
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| default_log_level());
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let telemetry = env::var("OTLP_ENDPOINT").ok().map(|endpoint| TelemetryConfig {
            endpoint,
            header_name: env::var("OTLP_HEADER_NAME").unwrap_or_else(|_| default_header_name()),
            api_key: env::var("OTLP_API_KEY").ok(),
        });

        let config = Config {
            database_url,
            bind_address,
            max_pool_size,
            log_level,
            cors_allowed_origins,
            telemetry,
        };
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, anyhow::Error> {
        LevelFilter::from_str(&self.log_level)
            .with_context(|| format!("Invalid log level: {}", self.log_level))
    }
}

fn read_env(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).with_context(|| format!("Unable to read env var: {}", key))
}
