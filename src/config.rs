use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, TranslyError};

// Default values for optional sections
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_ui_locale() -> String {
    "ko".to_string()
}

fn default_target() -> String {
    "English".to_string()
}

fn default_detect_delay_ms() -> u64 {
    3000
}

fn default_web_max_chars() -> usize {
    5000
}

fn default_web_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for the Gemini API (required)
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the Gemini REST API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Timeout for a single model request
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// UI locale tag used at startup ("ko" or "en")
    #[serde(default = "default_ui_locale")]
    pub ui_locale: String,
    /// Target language selected at startup
    #[serde(default = "default_target")]
    pub default_target: String,
    /// Idle time after the last edit before the input language is detected
    #[serde(default = "default_detect_delay_ms")]
    pub detect_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Maximum number of characters taken from a scraped page
    #[serde(default = "default_web_max_chars")]
    pub max_chars: usize,
    /// Timeout for fetching a page
    #[serde(default = "default_web_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ui_locale: default_ui_locale(),
            default_target: default_target(),
            detect_delay_ms: default_detect_delay_ms(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            max_chars: default_web_max_chars(),
            timeout_secs: default_web_timeout_secs(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslyError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TranslyError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TranslyError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslyError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Check that the configuration can start a session.
    ///
    /// The API key is the only required value; everything else has defaults.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(TranslyError::Config(
                "API key is missing. Set [gemini] api_key in the config file".to_string(),
            ));
        }
        if self.web.max_chars == 0 {
            return Err(TranslyError::Config("web.max_chars must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// API key with surrounding whitespace removed
    pub fn api_key(&self) -> &str {
        self.gemini.api_key.trim()
    }
}
