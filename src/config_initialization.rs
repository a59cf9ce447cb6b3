//! Configuration initialization and hierarchy management

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::adapters::cutlist_http::CutlistServerConfig;
use crate::adapters::toml_config::{
    KEY_LOG_LEVEL, KEY_REQUEST_TIMEOUT, KEY_SERVER_URL, KEY_TICK_INTERVAL, KEY_USER_AGENT,
};
use crate::cli::Cli;
use crate::domain::errors::DomainError;
use crate::ports::{ConfigPort, LogLevel};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cutlist.toml";

/// Environment variables and the settings they override
const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("CUTLIST_SERVER_URL", KEY_SERVER_URL),
    ("CUTLIST_REQUEST_TIMEOUT", KEY_REQUEST_TIMEOUT),
    ("CUTLIST_TICK_INTERVAL_MS", KEY_TICK_INTERVAL),
    ("CUTLIST_USER_AGENT", KEY_USER_AGENT),
    ("CUTLIST_LOG_LEVEL", KEY_LOG_LEVEL),
];

/// Typed view of the resolved configuration
#[derive(Debug, Clone)]
pub struct CutlistSettings {
    pub server_url: String,
    pub request_timeout: Duration,
    pub tick_interval: Duration,
    pub user_agent: String,
    pub log_level: LogLevel,
}

impl CutlistSettings {
    /// Read the settings from a configuration port
    pub async fn from_port(config: &dyn ConfigPort) -> Result<Self, DomainError> {
        let server_url = required(config, KEY_SERVER_URL).await?;
        let request_timeout = Duration::from_secs(number(config, KEY_REQUEST_TIMEOUT).await?);
        let tick_interval = Duration::from_millis(number(config, KEY_TICK_INTERVAL).await?);
        let user_agent = required(config, KEY_USER_AGENT).await?;
        let log_level = LogLevel::parse(&required(config, KEY_LOG_LEVEL).await?)?;

        Ok(Self {
            server_url,
            request_timeout,
            tick_interval,
            user_agent,
            log_level,
        })
    }

    /// Settings of the repository client
    pub fn server_config(&self) -> CutlistServerConfig {
        CutlistServerConfig {
            base_url: self.server_url.clone(),
            timeout: self.request_timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}

async fn required(config: &dyn ConfigPort, key: &str) -> Result<String, DomainError> {
    config
        .get_config(key)
        .await?
        .ok_or_else(|| DomainError::Config(format!("missing setting '{}'", key)))
}

async fn number(config: &dyn ConfigPort, key: &str) -> Result<u64, DomainError> {
    let value = required(config, key).await?;
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| DomainError::Config(format!("setting '{}' is not a number: {}", key, value)))
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(
    config: &dyn ConfigPort,
    cli: &Cli,
) -> Result<CutlistSettings> {
    // Defaults are in place once the adapter exists
    load_config_file(config, cli.config.as_deref()).await?;
    apply_environment_overrides(config, |name| std::env::var(name).ok()).await?;
    apply_cli_overrides(config, cli).await?;

    config
        .validate_config()
        .await
        .context("Invalid configuration")?;

    let settings = CutlistSettings::from_port(config).await?;
    debug!("Configuration resolved: {:?}", settings);
    Ok(settings)
}

/// Load configuration from file.
///
/// An explicitly given file must exist; the default file is optional.
async fn load_config_file(config: &dyn ConfigPort, explicit: Option<&str>) -> Result<()> {
    if let Some(path) = explicit {
        config
            .load_config(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path))?;
        debug!("Loaded configuration from: {}", path);
        return Ok(());
    }

    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        config.load_config(DEFAULT_CONFIG_FILE).await?;
        debug!("Loaded configuration from: {}", DEFAULT_CONFIG_FILE);
    }

    Ok(())
}

/// Apply environment variable overrides to configuration
pub async fn apply_environment_overrides<F>(config: &dyn ConfigPort, lookup: F) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    for (env_var, config_key) in ENV_MAPPINGS {
        if let Some(value) = lookup(env_var) {
            debug!("Found environment override: {} = {}", env_var, value);
            config.set_config(config_key, &value).await?;
            env_overrides += 1;
        }
    }

    if env_overrides > 0 {
        debug!("Applied {} environment variable overrides", env_overrides);
    }

    Ok(env_overrides)
}

/// Apply CLI argument overrides to configuration
pub async fn apply_cli_overrides(config: &dyn ConfigPort, cli: &Cli) -> Result<usize> {
    let mut cli_overrides = 0;

    if let Some(server_url) = &cli.server_url {
        config.set_config(KEY_SERVER_URL, server_url).await?;
        cli_overrides += 1;
    }
    if let Some(timeout) = cli.timeout {
        config
            .set_config(KEY_REQUEST_TIMEOUT, &timeout.to_string())
            .await?;
        cli_overrides += 1;
    }
    if let Some(log_level) = &cli.log_level {
        config.set_config(KEY_LOG_LEVEL, log_level).await?;
        cli_overrides += 1;
    }

    if cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", cli_overrides);
    }

    Ok(cli_overrides)
}
