//! Configuration management for the CV analyzer

use crate::error::{CvAnalyzerError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables consulted for the backend base URL, in order.
pub const BACKEND_URL_VARS: &[&str] = &["CV_ANALYZER_BACKEND_URL", "NEXT_PUBLIC_BACKEND_URL"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    /// No timeout unless set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_secs: None,
                user_agent: format!("cv-analyzer/{}", env!("CARGO_PKG_VERSION")),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, creating it on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content)
                .map_err(|e| CvAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            config
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CvAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-analyzer")
            .join("config.toml")
    }

    /// Override the backend URL from the environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in BACKEND_URL_VARS {
            if let Some(url) = lookup(key).filter(|v| !v.trim().is_empty()) {
                debug!("Backend URL taken from {}", key);
                self.backend.base_url = url.trim().trim_end_matches('/').to_string();
                return;
            }
        }
    }

    /// Set a single value by dotted key, e.g. `backend.base_url`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "backend.base_url" => {
                if value.trim().is_empty() {
                    return Err(CvAnalyzerError::Configuration("backend.base_url cannot be empty".to_string()));
                }
                self.backend.base_url = value.trim().trim_end_matches('/').to_string();
            }
            "backend.timeout_secs" => {
                self.backend.timeout_secs = match value {
                    "" | "none" | "off" => None,
                    secs => Some(secs.parse().map_err(|_| {
                        CvAnalyzerError::Configuration(format!("Invalid timeout: {}", secs))
                    })?),
                };
            }
            "backend.user_agent" => self.backend.user_agent = value.to_string(),
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(CvAnalyzerError::Configuration)?;
            }
            "output.detailed" => self.output.detailed = parse_bool(key, value)?,
            "output.color_output" => self.output.color_output = parse_bool(key, value)?,
            _ => {
                return Err(CvAnalyzerError::Configuration(format!("Unknown configuration key: {}", key)));
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CvAnalyzerError::Configuration(format!("{} expects true or false, got {}", key, value))),
    }
}
