use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::error::RescountError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

const DEFAULT_URL: &str = "http://localhost:32400";
const DEFAULT_TOKEN: &str = "default-token";
const DEFAULT_LEVEL: &str = "info";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub token: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            token: DEFAULT_TOKEN.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Section titles to report. Empty selects every movie and show section.
    pub sections: Vec<String>,
    /// Log one line per tallied item.
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.into(),
        }
    }
}

/// Values supplied on the command line or through the environment. Each
/// one that is set replaces the corresponding file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub token: Option<String>,
    pub log_level: Option<String>,
    pub verbose: bool,
    pub sections: Vec<String>,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, RescountError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load a specific config file. Missing tables and keys keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self, RescountError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig =
            toml::from_str(&content).map_err(|e| RescountError::Config(e.to_string()))?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "rescount")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.url {
            self.server.url = url;
        }
        if let Some(token) = overrides.token {
            self.server.token = token;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.verbose {
            self.report.verbose = true;
        }
        if !overrides.sections.is_empty() {
            self.report.sections = overrides.sections;
        }
    }

    /// Configured log level. Names are case-insensitive, `warning` is
    /// accepted for `warn`, and anything unrecognized falls back to info.
    pub fn level_filter(&self) -> LevelFilter {
        let level = self.logging.level.trim().to_ascii_lowercase();
        let level = if level == "warning" { "warn" } else { level.as_str() };
        level.parse().unwrap_or(LevelFilter::INFO)
    }

    /// Per-item lines are on when requested explicitly or when logging at
    /// debug or finer.
    pub fn verbose(&self) -> bool {
        self.report.verbose || self.level_filter() >= LevelFilter::DEBUG
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
