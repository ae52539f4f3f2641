//!
//! Handles application configuration: colour mode and the output palette.
//! Configuration is loaded from `config.toml`. A file named with `--config`
//! or `TEXTSEARCH_CONFIG_PATH` must exist; a missing file at the default
//! location means defaults.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_DIRECTORY_COLOR, DEFAULT_HEADER_COLOR,
    DEFAULT_HIGHLIGHT_COLOR,
};
use crate::error::{Result, SearchError};

/// When to emit terminal colour sequences.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colour only when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// Colour names (as understood by `colored`) or `#rrggbb` values.
pub struct PaletteConfig {
    /// Start banner.
    #[serde(default = "default_header_color")]
    pub header: String,
    /// Directory announcements.
    #[serde(default = "default_directory_color")]
    pub directory: String,
    /// Matched span inside a reported line.
    #[serde(default = "default_highlight_color")]
    pub highlight: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            header: default_header_color(),
            directory: default_directory_color(),
            highlight: default_highlight_color(),
        }
    }
}

fn default_header_color() -> String {
    DEFAULT_HEADER_COLOR.to_string()
}

fn default_directory_color() -> String {
    DEFAULT_DIRECTORY_COLOR.to_string()
}

fn default_highlight_color() -> String {
    DEFAULT_HIGHLIGHT_COLOR.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
/// Top-level application configuration.
pub struct AppConfig {
    #[serde(default)]
    pub color: ColorMode,
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Default location: `<config dir>/textsearch/config.toml`.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| SearchError::Config("Could not determine config directory".to_string()))?;
    Ok(config_dir.join(APP_NAME).join(CONFIG_FILE_NAME))
}

/// Where the configuration is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    /// Named by the user (flag or environment). Such a file must exist.
    pub explicit: bool,
}

/// Resolves the config file location: `--config` flag, then the
/// `TEXTSEARCH_CONFIG_PATH` environment variable, then the default location.
pub fn resolve_config_location(override_path: Option<&PathBuf>) -> Result<ConfigLocation> {
    let env_path = std::env::var_os(CONFIG_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    resolve_config_location_from(override_path, env_path)
}

fn resolve_config_location_from(
    override_path: Option<&PathBuf>,
    env_path: Option<PathBuf>,
) -> Result<ConfigLocation> {
    if let Some(path) = override_path {
        log::debug!("Using override config path: {}", path.display());
        return Ok(ConfigLocation {
            path: path.clone(),
            explicit: true,
        });
    }
    if let Some(path) = env_path {
        log::debug!("Using config path from ENV: {}", path.display());
        return Ok(ConfigLocation { path, explicit: true });
    }
    Ok(ConfigLocation {
        path: get_config_path()?,
        explicit: false,
    })
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    toml::from_str(content).map_err(|e| SearchError::Config(format!("Invalid TOML: {}", e)))
}

/// Loads the configuration. Only the default location may be absent, in
/// which case defaults are used.
pub fn load_config(override_path: Option<&PathBuf>) -> Result<AppConfig> {
    let location = resolve_config_location(override_path)?;
    load_config_at(&location)
}

pub fn load_config_at(location: &ConfigLocation) -> Result<AppConfig> {
    let config_file_path = &location.path;
    log::debug!("Attempting to load config from: {}", config_file_path.display());

    if !config_file_path.exists() {
        if location.explicit {
            return Err(SearchError::Config(format!(
                "Config file not found: {}",
                config_file_path.display()
            )));
        }
        log::debug!(
            "Config file not found at '{}'. Using defaults.",
            config_file_path.display()
        );
        return Ok(AppConfig::default());
    }

    let config_content = fs::read_to_string(config_file_path).map_err(|e| {
        SearchError::Config(format!(
            "Failed to read config file at '{}': {}",
            config_file_path.display(),
            e
        ))
    })?;

    match parse_config(&config_content) {
        Ok(config) => {
            log::debug!("Parsed config successfully: {:?}", config);
            Ok(config)
        }
        Err(e) => {
            log::error!(
                "Failed to parse config file at '{}': {}",
                config_file_path.display(),
                e
            );
            Err(e)
        }
    }
}
