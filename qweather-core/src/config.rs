use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    log_level::LogLevel,
    transport::{
        ClientSettings, DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_POOL_MAX_IDLE_PER_HOST, DEFAULT_TIMEOUT,
    },
};

pub const ENV_API_BASE: &str = "QWEATHER_API_BASE";
pub const ENV_API_KEY: &str = "QWEATHER_API_KEY";
pub const ENV_LOG_LEVEL: &str = "QWEATHER_LOG_LEVEL";

/// Connection pool limits, fixed for the life of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub max_idle_per_host: usize,
    pub idle_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            idle_timeout_secs: DEFAULT_POOL_IDLE_TIMEOUT.as_secs(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://abc123.qweatherapi.com"
/// api_key = "..."
/// log_level = "info"
/// timeout_secs = 10
///
/// [pool]
/// max_idle_per_host = 10
/// idle_timeout_secs = 90
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub log_level: LogLevel,
    pub timeout_secs: u64,
    pub pool: PoolConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            log_level: LogLevel::default(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            pool: PoolConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "qweather", "qweather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay the process environment on top of the file values.
    pub fn with_env(mut self) -> Result<Self> {
        self.apply_env_from(|name| std::env::var(name).ok())?;
        Ok(self)
    }

    /// Overlay values from `lookup`; empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = lookup(ENV_API_BASE) {
            self.base_url = Some(base_url);
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level
                .parse()
                .with_context(|| format!("Invalid {ENV_LOG_LEVEL}"))?;
        }
        Ok(())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_base_url(&mut self, base_url: String) {
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }

    /// Settings for a client session. Base URL and key are both required.
    pub fn client_settings(&self) -> Result<ClientSettings> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            anyhow!(
                "No API base URL configured.\n\
                 Hint: run `qweather configure` or set {ENV_API_BASE}."
            )
        })?;
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `qweather configure` or set {ENV_API_KEY}."
            )
        })?;

        if self.timeout_secs == 0 {
            return Err(anyhow!(
                "Request timeout must be at least 1 second.\n\
                 Hint: set `timeout_secs` in the config file or pass a positive --timeout-secs."
            ));
        }

        Ok(ClientSettings {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            log_level: self.log_level,
            timeout: Duration::from_secs(self.timeout_secs),
            pool_max_idle_per_host: self.pool.max_idle_per_host,
            pool_idle_timeout: Duration::from_secs(self.pool.idle_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn client_settings_errors_when_base_url_missing() {
        let cfg = Config::default();
        let err = cfg.client_settings().unwrap_err();

        assert!(err.to_string().contains("No API base URL configured"));
        assert!(err.to_string().contains("qweather configure"));
    }

    #[test]
    fn client_settings_errors_when_key_missing() {
        let mut cfg = Config::default();
        cfg.set_base_url("https://api.example.com/".into());

        let err = cfg.client_settings().unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn client_settings_carry_defaults() {
        let mut cfg = Config::default();
        cfg.set_base_url("https://api.example.com/".into());
        cfg.set_api_key("KEY".into());

        let settings = cfg.client_settings().expect("settings must build");
        assert_eq!(settings.base_url, "https://api.example.com");
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.pool_max_idle_per_host, 10);
        assert_eq!(settings.pool_idle_timeout, Duration::from_secs(90));
        assert_eq!(settings.log_level, LogLevel::Error);
        assert!(cfg.is_configured());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut cfg = Config::default();
        cfg.set_base_url("https://api.example.com".into());
        cfg.set_api_key("KEY".into());
        cfg.timeout_secs = 0;

        let err = cfg.client_settings().unwrap_err();
        assert!(err.to_string().contains("at least 1 second"));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut cfg = Config::default();
        cfg.set_base_url("https://file.example.com".into());
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env_from(env(&[
            (ENV_API_KEY, "ENV_KEY"),
            (ENV_LOG_LEVEL, "DEBUG"),
            (ENV_API_BASE, ""),
        ]))
        .expect("overlay must apply");

        assert_eq!(cfg.api_key.as_deref(), Some("ENV_KEY"));
        assert_eq!(cfg.base_url.as_deref(), Some("https://file.example.com"));
        assert_eq!(cfg.log_level, LogLevel::Debug);
    }

    #[test]
    fn invalid_env_log_level_is_an_error() {
        let mut cfg = Config::default();
        let err = cfg
            .apply_env_from(env(&[(ENV_LOG_LEVEL, "loud")]))
            .unwrap_err();

        assert!(err.to_string().contains(ENV_LOG_LEVEL));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            api_key = "KEY"
            log_level = "info"

            [pool]
            max_idle_per_host = 4
            "#,
        )
        .expect("config must parse");

        assert_eq!(cfg.log_level, LogLevel::Info);
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.pool.max_idle_per_host, 4);
        assert_eq!(cfg.pool.idle_timeout_secs, 90);
        assert!(cfg.base_url.is_none());
    }

    #[test]
    fn saved_form_parses_back() {
        let mut cfg = Config::default();
        cfg.set_base_url("https://api.example.com".into());
        cfg.set_api_key("KEY".into());

        let text = toml::to_string_pretty(&cfg).expect("config must serialize");
        let parsed: Config = toml::from_str(&text).expect("config must parse");
        assert_eq!(parsed, cfg);
    }
}
