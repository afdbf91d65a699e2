//! Process configuration: defaults, environment overrides, optional YAML file.
//!
//! Only the boundary (the [`Assistant`](crate::Assistant) and the HTTP
//! server) reads configuration. Parsing and classification take none.

use serde::Deserialize;
use std::time::Duration;

use crate::backend::GenerationConfig;
use crate::error::Result;
use crate::AssistantError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Listen address.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote model settings.
#[derive(Clone, Deserialize)]
pub struct ModelConfig {
    /// `None` leaves the model unconfigured; every request is then unavailable.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

fn default_log_level() -> String {
    "INFO".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field(
                "api_key",
                &self.api_key.as_deref().map(crate::backend::gemini::redact),
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl ModelConfig {
    /// API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment, then validated.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file, apply environment overrides, then validate.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (normally `std::env::var`).
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `GEMINI_API_KEY` | `model.api_key` (blank clears it) |
    /// | `GEMINI_MODEL` | `model.model` |
    /// | `GEMINI_BASE_URL` | `model.base_url` |
    /// | `GEMINI_TIMEOUT_SECS` | `model.timeout_secs` |
    /// | `ASSISTANT_HOST` | `server.host` |
    /// | `ASSISTANT_PORT` | `server.port` |
    /// | `ASSISTANT_LOG_LEVEL` | `log_level` |
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.model.api_key = Some(key).filter(|k| !k.trim().is_empty());
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.model.model = model;
        }
        if let Some(url) = lookup("GEMINI_BASE_URL") {
            self.model.base_url = url;
        }
        if let Some(secs) = lookup("GEMINI_TIMEOUT_SECS") {
            self.model.timeout_secs = parse_number("GEMINI_TIMEOUT_SECS", &secs)?;
        }
        if let Some(host) = lookup("ASSISTANT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ASSISTANT_PORT") {
            self.server.port = parse_number("ASSISTANT_PORT", &port)?;
        }
        if let Some(level) = lookup("ASSISTANT_LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AssistantError::InvalidConfig("server.port must be non-zero".into()));
        }
        if self.model.model.trim().is_empty() {
            return Err(AssistantError::InvalidConfig("model.model must not be empty".into()));
        }
        let url = self.model.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AssistantError::InvalidConfig(format!(
                "model.base_url must start with http:// or https://, got '{}'",
                url
            )));
        }
        if self.model.timeout_secs == 0 {
            return Err(AssistantError::InvalidConfig(
                "model.timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AssistantError::InvalidConfig(format!("{} is not a valid number: '{}'", name, value)))
}
