use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub modem: ModemConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModemConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_status_path")]
    pub status_path: String,
    #[serde(default = "default_signal_path")]
    pub signal_path: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Shortest pause the poll loop ever takes between cycles
pub const MIN_SLEEP_FLOOR: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_seconds: u64,
    #[serde(default = "default_min_sleep")]
    pub min_sleep_seconds: u64,
}

fn default_base_url() -> String {
    "http://192.168.100.1".to_string()
}

fn default_status_path() -> String {
    "/indexData.htm".to_string()
}

fn default_signal_path() -> String {
    "/cmSignalData.htm".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8786
}

fn default_refresh_rate() -> u64 {
    30
}

fn default_min_sleep() -> u64 {
    5
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            status_path: default_status_path(),
            signal_path: default_signal_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            refresh_rate_seconds: default_refresh_rate(),
            min_sleep_seconds: default_min_sleep(),
        }
    }
}

impl ModemConfig {
    pub fn status_url(&self) -> String {
        join_url(&self.base_url, &self.status_path)
    }

    pub fn signal_url(&self) -> String {
        join_url(&self.base_url, &self.signal_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl MetricsConfig {
    pub fn refresh_rate(&self) -> Duration {
        Duration::from_secs(self.refresh_rate_seconds)
    }

    /// Pause floor between polls; configured values below [`MIN_SLEEP_FLOOR`] are raised to it
    pub fn min_sleep(&self) -> Duration {
        Duration::from_secs(self.min_sleep_seconds).max(MIN_SLEEP_FLOOR)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SURFBOARD_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
