use std::path::PathBuf;

use clap::Parser;

use rescount_core::config::{AppConfig, ConfigOverrides};
use rescount_core::error::RescountError;

/// Count the movies and TV episodes in a Plex library by video resolution.
#[derive(Debug, Parser)]
#[command(name = "rescount", version)]
pub struct Args {
    /// Plex server address.
    #[arg(long, env = "PLEX_URL")]
    pub url: Option<String>,

    /// Plex access token.
    #[arg(long, env = "PLEX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log level (error, warn, info, debug, trace). Debug and trace also
    /// enable per-item lines.
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log one line per movie or episode while tallying.
    #[arg(short, long)]
    pub verbose: bool,

    /// Report only this section. Repeat for several; defaults to every
    /// movie and show section.
    #[arg(short, long = "section", value_name = "NAME")]
    pub sections: Vec<String>,

    /// Config file to use instead of the one in the user config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Resolve the effective configuration: file (or built-in defaults),
    /// then environment and flags on top.
    pub fn load_config(&self) -> Result<AppConfig, RescountError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };
        config.apply(self.overrides());
        Ok(config)
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            url: self.url.clone(),
            token: self.token.clone(),
            log_level: self.log_level.clone(),
            verbose: self.verbose,
            sections: self.sections.clone(),
        }
    }
}
