// TOML config adapter - Configuration management using TOML files

use crate::adapters::cutlist_http::DEFAULT_SERVER_URL;
use crate::app::progress_ticker::DEFAULT_TICK_INTERVAL;
use crate::domain::errors::*;
use crate::ports::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Table of the config file holding the settings
const CONFIG_TABLE: &str = "cutlist";

pub const KEY_SERVER_URL: &str = "server_url";
pub const KEY_REQUEST_TIMEOUT: &str = "request_timeout_secs";
pub const KEY_TICK_INTERVAL: &str = "tick_interval_ms";
pub const KEY_USER_AGENT: &str = "user_agent";
pub const KEY_LOG_LEVEL: &str = "log_level";

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: RwLock<HashMap<String, String>>,
    config_file_path: RwLock<Option<PathBuf>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter holding the default values
    pub fn new() -> Self {
        Self {
            config: RwLock::new(Self::default_values()),
            config_file_path: RwLock::new(None),
        }
    }

    /// Default configuration values
    fn default_values() -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert(KEY_SERVER_URL.to_string(), DEFAULT_SERVER_URL.to_string());
        config.insert(KEY_REQUEST_TIMEOUT.to_string(), "30".to_string());
        config.insert(
            KEY_TICK_INTERVAL.to_string(),
            DEFAULT_TICK_INTERVAL.as_millis().to_string(),
        );
        config.insert(
            KEY_USER_AGENT.to_string(),
            format!("cutlist-cli/{}", env!("CARGO_PKG_VERSION")),
        );
        config.insert(KEY_LOG_LEVEL.to_string(), "info".to_string());
        config
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>, DomainError> {
        self.config
            .read()
            .map_err(|_| DomainError::Internal("configuration lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>, DomainError> {
        self.config
            .write()
            .map_err(|_| DomainError::Internal("configuration lock poisoned".to_string()))
    }

    /// Path of the file the configuration was loaded from, if any
    pub fn config_file_path(&self) -> Option<PathBuf> {
        self.config_file_path
            .read()
            .ok()
            .and_then(|path| path.clone())
    }

    /// Merge the `[cutlist]` table of a TOML document into the configuration
    fn deserialize_config(&self, toml_content: &str) -> Result<(), DomainError> {
        let parsed: toml::Value = toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;

        let mut config = self.write()?;
        if let Some(table) = parsed.get(CONFIG_TABLE).and_then(|t| t.as_table()) {
            for (key, value) in table {
                let value = match value {
                    toml::Value::String(s) => s.clone(),
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    other => {
                        return Err(DomainError::Config(format!(
                            "Unsupported value for {}: {}",
                            key, other
                        )))
                    }
                };
                config.insert(key.clone(), value);
            }
        }

        Ok(())
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a positive integer setting
fn positive_number(key: &str, value: &str) -> Result<u64, DomainError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(DomainError::Config(format!(
            "{} must be a positive integer, got '{}'",
            key, value
        ))),
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        let config = self.read()?;
        Ok(config.get(key).cloned())
    }

    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError> {
        let config = self.read()?;
        Ok(config
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut config = self.write()?;
        config.insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &str) -> Result<(), DomainError> {
        let path = PathBuf::from(file_path);

        let content = std::fs::read_to_string(&path).map_err(|e| {
            DomainError::Config(format!("Failed to read config file {}: {}", file_path, e))
        })?;

        self.deserialize_config(&content)?;
        if let Ok(mut config_path) = self.config_file_path.write() {
            *config_path = Some(path);
        }

        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        let config = self.read()?;

        if let Some(url) = config.get(KEY_SERVER_URL) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(DomainError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    KEY_SERVER_URL, url
                )));
            }
        }

        for key in [KEY_REQUEST_TIMEOUT, KEY_TICK_INTERVAL] {
            if let Some(value) = config.get(key) {
                positive_number(key, value)?;
            }
        }

        if let Some(log_level) = config.get(KEY_LOG_LEVEL) {
            LogLevel::parse(log_level).map_err(|e| DomainError::Config(e.to_string()))?;
        }

        Ok(())
    }

    async fn get_all_config_keys(&self) -> Result<Vec<String>, DomainError> {
        let config = self.read()?;
        let mut keys: Vec<String> = config.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
