//! Layered configuration
//!
//! Precedence, highest first: CLI overrides, `TAGSITE_API_URL`, the TOML
//! file, built-in defaults. A missing file is fine; a malformed one is not.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::paths;
use crate::platform::{Platform, DEFAULT_PLATFORMS};

pub const DEFAULT_API_URL: &str = "https://tagsite-28083845590.us-central1.run.app";
pub const API_URL_ENV: &str = "TAGSITE_API_URL";
const DEFAULT_TOAST_SECS: u64 = 3;

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    /// Options offered by every platform selector, in display order
    pub platforms: Vec<Platform>,
    pub default_platform: Platform,
    pub toast_secs: u64,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            platforms: DEFAULT_PLATFORMS.iter().map(|p| Platform::new(*p)).collect(),
            default_platform: Platform::default(),
            toast_secs: DEFAULT_TOAST_SECS,
            request_timeout_secs: None,
        }
    }
}

/// Keys accepted in `config.toml`; everything optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    platforms: Option<Vec<String>>,
    default_platform: Option<String>,
    toast_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub platform: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load from `path`, or the default location when `None`, then apply
    /// the environment layer.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let default_path = paths::config_file();
        let path = path.or(default_path.as_deref());
        let env_url = std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty());
        Self::load_layers(path, env_url)
    }

    fn load_layers(path: Option<&Path>, env_url: Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = path {
            if path.exists() {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                let file: FileConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?;
                config.merge_file(file);
                info!(path = %path.display(), "Loaded config file");
            } else {
                debug!(path = %path.display(), "No config file, using defaults");
            }
        }

        if let Some(url) = env_url {
            config.api_url = url;
        }

        config.normalize();
        Ok(config)
    }

    fn merge_file(&mut self, file: FileConfig) {
        if let Some(url) = file.api_url {
            self.api_url = url;
        }
        if let Some(platforms) = file.platforms {
            self.platforms = platforms.iter().map(|p| Platform::new(p.trim())).collect();
        }
        if let Some(platform) = file.default_platform {
            self.default_platform = Platform::new(platform.trim());
        }
        if let Some(secs) = file.toast_secs {
            self.toast_secs = secs;
        }
        if file.request_timeout_secs.is_some() {
            self.request_timeout_secs = file.request_timeout_secs;
        }
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.api_url {
            self.api_url = url;
        }
        if let Some(platform) = overrides.platform {
            self.default_platform = Platform::new(platform.trim());
        }
        if overrides.timeout_secs.is_some() {
            self.request_timeout_secs = overrides.timeout_secs;
        }
        self.normalize();
    }

    /// Drop blank platforms and make sure the default one is selectable
    fn normalize(&mut self) {
        self.platforms.retain(|p| !p.as_str().is_empty());
        self.platforms.dedup();
        if self.default_platform.as_str().is_empty() {
            self.default_platform = self.platforms.first().cloned().unwrap_or_default();
        }
        if !self.platforms.contains(&self.default_platform) {
            self.platforms.push(self.default_platform.clone());
        }
        if self.toast_secs == 0 {
            self.toast_secs = DEFAULT_TOAST_SECS;
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_layers(Some(&dir.path().join("nope.toml")), None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.platforms, vec![Platform::new("rj"), Platform::new("steam")]);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_file_layer_and_env_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
api_url = "http://localhost:9000"
platforms = ["rj", "steam", "dlsite"]
default_platform = "steam"
toast_secs = 5
request_timeout_secs = 20
"#,
        )
        .unwrap();

        let config = Config::load_layers(Some(&path), None).unwrap();
        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.platforms.len(), 3);
        assert_eq!(config.default_platform.as_str(), "steam");
        assert_eq!(config.toast_duration(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(20)));

        let config =
            Config::load_layers(Some(&path), Some("http://env.test".to_string())).unwrap();
        assert_eq!(config.api_url, "http://env.test");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [").unwrap();
        let err = Config::load_layers(Some(&path), None).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));

        std::fs::write(&path, "colour = \"blue\"").unwrap();
        assert!(Config::load_layers(Some(&path), None).is_err());
    }

    #[test]
    fn test_overrides_win_and_platform_is_added() {
        let mut config = Config::default();
        config.apply_overrides(Overrides {
            api_url: Some("http://cli.test".to_string()),
            platform: Some("dlsite".to_string()),
            timeout_secs: Some(3),
        });
        assert_eq!(config.api_url, "http://cli.test");
        assert_eq!(config.default_platform.as_str(), "dlsite");
        assert!(config.platforms.contains(&Platform::new("dlsite")));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(3)));
    }
}
