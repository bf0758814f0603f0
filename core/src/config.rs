use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RepairError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the user REST API.
    pub api_base_url: String,
    /// Filter directive for the tracing subscriber.
    pub log_level: String,
    /// Sample jobs given to a technician with an empty queue.
    pub worker_demo_jobs: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: "info".to_string(),
            worker_demo_jobs: 3,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| RepairError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `content`, falling back to defaults with a warning.
    pub fn from_toml_or_default(content: &str) -> Self {
        match Self::from_toml_str(content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_base_url)
            .map_err(|e| RepairError::Config(format!("api_base_url: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RepairError::Config(format!(
                "api_base_url must be http(s), got {}",
                url.scheme()
            )));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(RepairError::Config(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str("log_level = \"debug\"").unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.worker_demo_jobs, 3);
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = AppConfig::from_toml_str("api_base_url = \"ftp://example.com\"").unwrap_err();
        assert!(err.to_string().contains("http"));
        assert!(AppConfig::from_toml_str("api_base_url = \"not a url\"").is_err());
    }

    #[test]
    fn test_bad_level_falls_back() {
        let config = AppConfig::from_toml_or_default("log_level = \"loud\"");
        assert_eq!(config, AppConfig::default());
    }
}
