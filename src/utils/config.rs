use crate::Args;
use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ytdlp_path: String,
    pub quiet: bool,
    pub force_generic_extractor: bool,
    pub ignore_errors: bool,
    pub json: bool,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        debug!("Creating a new default configuration.");
        Self {
            ytdlp_path: String::from("yt-dlp"),
            quiet: true,
            force_generic_extractor: true,
            ignore_errors: true,
            json: false,
            debug: false,
        }
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to retrieve the config directory")?;
        Ok(config_dir.join("yt-titles").join("config.toml"))
    }

    pub fn load_config() -> anyhow::Result<Self> {
        debug!("Loading configuration...");
        let config_path = Self::config_path()?;
        debug!("Looking for config file at path: {}", config_path.display());

        let config = Config::load_from_file(&config_path)?;
        debug!("Configuration loaded successfully.");
        Ok(config)
    }

    fn write_default(file_path: &Path) -> anyhow::Result<Self> {
        let default_config = Config::new();
        let content = toml::to_string_pretty(&default_config)
            .context("Failed to serialize the default configuration")?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(file_path, content)
            .with_context(|| format!("Failed to write {}", file_path.display()))?;

        debug!("Wrote default configuration to {}", file_path.display());
        Ok(default_config)
    }

    pub fn load_from_file(file_path: &Path) -> anyhow::Result<Self> {
        if !file_path.is_file() {
            warn!(
                "No config file at {}, writing defaults.",
                file_path.display()
            );
            return Self::write_default(file_path);
        }

        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Invalid yt-titles config in {}", file_path.display()))
    }

    pub fn program_configuration<'a>(args: &'a mut Args, config: &Self) -> &'a mut Args {
        debug!("Applying configuration to program arguments.");

        args.ytdlp = Some(match &args.ytdlp {
            Some(ytdlp) => {
                debug!("Using provided yt-dlp executable: {}", ytdlp);
                ytdlp.clone()
            }
            None => {
                debug!("Using configured yt-dlp executable: {}", config.ytdlp_path);
                config.ytdlp_path.clone()
            }
        });

        args.json = if !args.json {
            debug!("Setting `json` to {}", config.json);
            config.json
        } else {
            args.json
        };

        args.debug = if !args.debug {
            debug!("Setting `debug` to {}", config.debug);
            config.debug
        } else {
            args.debug
        };

        args
    }
}
