use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

/// Client configuration module
/// This module handles loading, validating and saving the API credentials
/// and connection settings.
/// Represents the client configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Public API key
    #[serde(default)]
    pub public_key: String,

    /// Private API key, used to sign requests
    #[serde(default)]
    pub private_key: String,

    /// Which Gengo environment to talk to
    #[serde(default)]
    pub mode: ClientMode,

    /// Base URL override (optional, must be absolute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Production base URL
pub const PRODUCTION_URL: &str = "http://api.gengo.com/v2/";

/// Sandbox base URL
pub const SANDBOX_URL: &str = "http://api.sandbox.gengo.com/v2/";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "gengo.json";

/// Gengo environment
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientMode {
    Production,
    #[default]
    Sandbox,
}

impl ClientMode {
    // @returns: Base URL of the environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Sandbox => SANDBOX_URL,
        }
    }
}

impl std::fmt::Display for ClientMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Sandbox => write!(f, "sandbox"),
        }
    }
}

impl std::str::FromStr for ClientMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            _ => Err(anyhow!("Invalid client mode: {}", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("gengo-rs/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Create a configuration for a key pair
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            ..Default::default()
        }
    }

    // @validates: Keys present, base URL absolute, timeout non-zero
    pub fn validate(&self) -> Result<()> {
        if self.public_key.trim().is_empty() {
            return Err(anyhow!("Public key is required"));
        }

        if self.private_key.trim().is_empty() {
            return Err(anyhow!("Private key is required"));
        }

        if let Some(base_url) = &self.base_url {
            Url::parse(base_url)
                .with_context(|| format!("Base URL must be absolute: {}", base_url))?;
        }

        if self.timeout_secs == 0 {
            return Err(anyhow!("Timeout must be at least one second"));
        }

        Ok(())
    }

    /// Effective base URL, always ending in `/`
    pub fn endpoint(&self) -> String {
        let base = self
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.mode.base_url());

        if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        }
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: String::new(),
            mode: ClientMode::default(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            log_level: LogLevel::default(),
        }
    }
}
