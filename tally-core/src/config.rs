//! Configuration management
//!
//! Reads settings.json from the tally directory and applies environment
//! overrides. Presence of the remote backend settings decides whether
//! formal mode is selectable at all; without them the application runs
//! demo-mode only.
//!
//! ```json
//! {
//!   "remote": { "baseUrl": "https://...", "apiKey": "..." },
//!   "advice": { "apiKey": "...", "model": "..." }
//! }
//! ```

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default generative model for advice queries.
pub const DEFAULT_ADVICE_MODEL: &str = "gemini-3-pro-preview";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    remote: Option<RemoteSettings>,
    #[serde(default)]
    advice: Option<AdviceSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteSettings {
    base_url: String,
    api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdviceSettings {
    api_key: String,
    #[serde(default)]
    model: Option<String>,
}

/// Remote backend connection settings.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Generative-advice settings.
#[derive(Debug, Clone)]
pub struct AdviceConfig {
    pub api_key: String,
    pub model: String,
}

/// Tally configuration (simplified view of settings)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub remote: Option<RemoteConfig>,
    pub advice: Option<AdviceConfig>,
}

impl Config {
    /// Load config from the tally directory.
    ///
    /// The remote backend can be configured via:
    /// 1. settings.json (`remote` section)
    /// 2. Environment variable TALLY_REMOTE_CONFIG (JSON, takes precedence)
    ///
    /// A malformed settings file or env value is logged and treated as
    /// absent, never fatal.
    pub fn load(tally_dir: &Path) -> Result<Self> {
        let settings_path = tally_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("malformed settings.json, using defaults: {e}");
                SettingsFile::default()
            })
        } else {
            SettingsFile::default()
        };

        let mut remote = raw.remote.map(|r| RemoteConfig {
            base_url: r.base_url,
            api_key: r.api_key,
        });
        if let Ok(value) = std::env::var("TALLY_REMOTE_CONFIG") {
            remote = match serde_json::from_str::<RemoteSettings>(&value) {
                Ok(r) => Some(RemoteConfig {
                    base_url: r.base_url,
                    api_key: r.api_key,
                }),
                Err(e) => {
                    warn!("failed to parse TALLY_REMOTE_CONFIG, remote backend disabled: {e}");
                    None
                }
            };
        }

        let mut advice = raw.advice.map(|a| AdviceConfig {
            api_key: a.api_key,
            model: a.model.unwrap_or_else(|| DEFAULT_ADVICE_MODEL.to_string()),
        });
        if let Ok(key) = std::env::var("TALLY_ADVICE_KEY") {
            advice = if key.trim().is_empty() {
                None
            } else {
                let model = advice
                    .map(|a| a.model)
                    .unwrap_or_else(|| DEFAULT_ADVICE_MODEL.to_string());
                Some(AdviceConfig {
                    api_key: key,
                    model,
                })
            };
        }

        Ok(Self { remote, advice })
    }

    /// Whether a remote backend is configured (gates formal mode).
    pub fn remote_configured(&self) -> bool {
        self.remote.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_settings_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(!config.remote_configured());
        assert!(config.advice.is_none());
    }

    #[test]
    fn test_settings_file_is_read() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{
                "remote": { "baseUrl": "https://api.example.com", "apiKey": "k" },
                "advice": { "apiKey": "a" }
            }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        let remote = config.remote.as_ref().unwrap();
        assert_eq!(remote.base_url, "https://api.example.com");
        assert_eq!(config.advice.as_ref().unwrap().model, DEFAULT_ADVICE_MODEL);
    }

    #[test]
    fn test_malformed_settings_file_gives_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{oops").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert!(!config.remote_configured());
    }

    #[test]
    fn test_malformed_remote_env_disables_backend() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "remote": { "baseUrl": "https://api.example.com", "apiKey": "k" } }"#,
        )
        .unwrap();

        std::env::set_var("TALLY_REMOTE_CONFIG", "{not json");
        let config = Config::load(dir.path()).unwrap();
        std::env::remove_var("TALLY_REMOTE_CONFIG");

        assert!(!config.remote_configured());
    }
}
