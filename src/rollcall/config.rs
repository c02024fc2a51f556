use crate::error::{Result, RollcallError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Deployment configuration, stored as config.json in the rollcall data dir.
///
/// The base URL and path prefix are deployment details, not part of the
/// backend contract; some deployments mount the resource under `/api`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RollcallConfig {
    /// Backend base URL (e.g. "http://localhost:5000")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix in front of `/students` (e.g. "/api", empty for none)
    #[serde(default)]
    pub api_prefix: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for RollcallConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RollcallConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RollcallError::Io)?;
        let config: RollcallConfig =
            serde_json::from_str(&content).map_err(RollcallError::Parse)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RollcallError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RollcallError::Parse)?;
        fs::write(config_path, content).map_err(RollcallError::Io)?;
        Ok(())
    }

    /// The resolved root every resource path is appended to:
    /// base URL without trailing slash, plus a normalized prefix.
    pub fn endpoint_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return base.to_string();
        }
        if prefix.starts_with('/') {
            format!("{}{}", base, prefix)
        } else {
            format!("{}/{}", base, prefix)
        }
    }

    /// Set the prefix (normalizes to start with a slash, empty clears it)
    pub fn set_api_prefix(&mut self, prefix: &str) {
        let prefix = prefix.trim();
        if prefix.is_empty() || prefix == "/" {
            self.api_prefix = String::new();
        } else if prefix.starts_with('/') {
            self.api_prefix = prefix.trim_end_matches('/').to_string();
        } else {
            self.api_prefix = format!("/{}", prefix.trim_end_matches('/'));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let config = RollcallConfig::default();
        assert_eq!(config.endpoint_root(), "http://localhost:5000");
    }

    #[test]
    fn prefix_is_normalized() {
        let mut config = RollcallConfig::default();
        config.set_api_prefix("api/");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.endpoint_root(), "http://localhost:5000/api");

        config.set_api_prefix("/");
        assert_eq!(config.endpoint_root(), "http://localhost:5000");
    }

    #[test]
    fn load_missing_config_gives_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = RollcallConfig::load(temp_dir.path().join("nope")).unwrap();
        assert_eq!(config, RollcallConfig::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = RollcallConfig::default();
        config.base_url = "http://roster.example:8080".to_string();
        config.set_api_prefix("api");
        config.save(temp_dir.path()).unwrap();

        let loaded = RollcallConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"base_url": "http://10.0.0.2:5000"}"#,
        )
        .unwrap();

        let loaded = RollcallConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.base_url, "http://10.0.0.2:5000");
        assert_eq!(loaded.timeout_secs, 5);
    }
}
