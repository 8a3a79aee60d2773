//! Configuration management for coderev
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (CODEREV_*)
//! 3. Config file (~/.config/coderev/config.toml)
//! 4. Default values
//!
//! The model API key is not part of the config file; see [`crate::secrets`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default chat-completion endpoint (Groq's OpenAI-compatible API)
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default supported model identifier
pub const DEFAULT_MODEL: &str = "llama3-8b";

/// Model provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the OpenAI-compatible completion endpoint
    pub base_url: String,

    /// Model identifier to request
    pub model: Option<String>,

    /// Model substituted when `model` is unset or names a deprecated identifier
    pub fallback_model: String,

    /// Request timeout in seconds. None means no timeout is enforced.
    pub timeout_secs: Option<u64>,

    /// API key for the completion endpoint; loaded from secrets, never from
    /// the config file
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: None, // Use the fallback model
            fallback_model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
            api_key: None,
        }
    }
}

/// Review storage configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file. None means the platform default
    /// (~/.local/share/coderev/reviews.db on Linux).
    pub path: Option<PathBuf>,
}

/// Caller identity configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UserConfig {
    /// Identity that owns the reviews created by this installation
    pub name: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Model provider configuration
    pub model: ModelConfig,

    /// Review storage configuration
    pub storage: StorageConfig,

    /// Caller identity configuration
    pub user: UserConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/coderev/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("coderev").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - CODEREV_BASE_URL: Completion endpoint base URL
    /// - CODEREV_MODEL: Model identifier to request
    /// - CODEREV_DB_PATH: Path to the review database
    /// - CODEREV_USER: Identity that owns created reviews
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var("CODEREV_BASE_URL") {
            self.model.base_url = base_url;
        }

        if let Ok(model) = std::env::var("CODEREV_MODEL") {
            self.model.model = Some(model);
        }

        if let Ok(path) = std::env::var("CODEREV_DB_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Ok(user) = std::env::var("CODEREV_USER") {
            self.user.name = Some(user);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, model: Option<String>, user: Option<String>) -> Self {
        if let Some(m) = model {
            self.model.model = Some(m);
        }

        if let Some(u) = user {
            self.user.name = Some(u);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(model: Option<String>, user: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(model, user))
    }
}
