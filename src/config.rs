use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use serde::Deserialize;

use crate::error::HarvestError;

pub const DEFAULT_ENDPOINT: &str = "http://www.ensembl.org/biomart/martservice";

/// Raw JSON config file shape. Every key is optional; missing keys fall back
/// to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub retry_delay_secs: Option<u64>,
    #[serde(default)]
    pub pacing_delay_secs: Option<u64>,
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Resolved run parameters handed to the fetcher and orchestrator.
/// Zero delays are valid (tests rely on them).
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub pacing_delay: Duration,
    pub output_dir: Utf8PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
            pacing_delay: Duration::from_secs(1),
            output_dir: Utf8PathBuf::from("."),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve the run config. An explicit path must exist and parse; with no
    /// path the built-in defaults are used as-is.
    pub fn resolve(path: Option<&str>) -> Result<HarvestConfig, HarvestError> {
        let Some(path) = path else {
            return Ok(HarvestConfig::default());
        };
        let config_path = PathBuf::from(path);
        let content = fs::read_to_string(&config_path)
            .map_err(|_| HarvestError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| HarvestError::ConfigParse(err.to_string()))?;
        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> HarvestConfig {
        let defaults = HarvestConfig::default();
        HarvestConfig {
            endpoint: config.endpoint.unwrap_or(defaults.endpoint),
            timeout: config
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            // A zero-attempt fetcher could never return; one attempt minimum.
            max_attempts: config.max_attempts.unwrap_or(defaults.max_attempts).max(1),
            retry_delay: config
                .retry_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry_delay),
            pacing_delay: config
                .pacing_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.pacing_delay),
            output_dir: config
                .output_dir
                .map(Utf8PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }
}
