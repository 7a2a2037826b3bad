//! TOML-based application configuration.
//!
//! Stores:
//! - Backend settings (base URL of the integrations backend, request timeout)
//! - Default session identity for the CLI
//!
//! Configuration is stored at `~/.config/hublink/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Integrations-backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend that mediates the OAuth flow.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Default session identity, used by the CLI when flags are not given.
/// The desktop shell receives its identity from the frontend instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/hublink/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Directory holding the configuration, `~/.config/hublink` (or
/// `hublink-dev` when `HUBLINK_ENV=dev`). Created on first use.
pub fn config_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HUBLINK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("hublink-dev")
    } else {
        base_dir.join("hublink")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl Config {
    pub fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk; a missing file writes and returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk or return default.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory. The caller
    /// decides when to `save`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be
    /// parsed to the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }

    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err("config key is empty".into());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| format!("unknown config key: {key}"))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
                serde_json::Value::Number(_) => {
                    let n = value.parse::<u64>()?;
                    serde_json::Value::Number(n.into())
                }
                _ => serde_json::Value::String(value.to_string()),
            };
            obj.insert(part.to_string(), new_value);
        } else {
            current = current
                .get_mut(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.backend.base_url, "http://localhost:8000");
        assert_eq!(parsed.backend.timeout_secs, 30);
        assert_eq!(parsed.session.user_id, None);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get("backend.base_url").as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(cfg.get("backend.timeout_secs").as_deref(), Some("30"));
        assert_eq!(cfg.get("backend.missing"), None);
    }

    #[test]
    fn set_updates_known_keys() {
        let mut cfg = Config::default();
        cfg.set("backend.base_url", "https://api.example.com").unwrap();
        cfg.set("backend.timeout_secs", "5").unwrap();
        cfg.set("session.user_id", "u-1").unwrap();

        assert_eq!(cfg.backend.base_url, "https://api.example.com");
        assert_eq!(cfg.backend.timeout_secs, 5);
        assert_eq!(cfg.session.user_id.as_deref(), Some("u-1"));
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("backend.nope", "x").is_err());
        assert!(cfg.set("backend.timeout_secs", "fast").is_err());
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.backend.base_url, "http://localhost:8000");
    }
}
