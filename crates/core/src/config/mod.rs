use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{DashboardError, Result};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub pacing: PacingConfig,
}

impl AppConfig {
    /// Loads a JSON configuration file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw).map_err(|err| match err {
            DashboardError::Config(reason) => {
                DashboardError::Config(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| DashboardError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let base = self.backend.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "backend base_url `{base}` must start with http:// or https://"
            )));
        }
        Ok(())
    }
}

/// Where the computation backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

/// Perceived-progress pacing between steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub step_delay_ms: u64,
}

impl PacingConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { step_delay_ms: 200 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json_str(r#"{"pacing": {"step_delay_ms": 5}}"#).unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.pacing.step_delay(), Duration::from_millis(5));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::from_json_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, DashboardError::Io(_)));
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let err = AppConfig::from_json_str(r#"{"backend": {"base_url": "localhost:5000"}}"#)
            .unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}
