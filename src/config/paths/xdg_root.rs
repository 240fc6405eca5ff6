//! XDG Base Directory utilities for cache and config locations.

use crate::error::BotError;
use std::path::PathBuf;

const APP_DIR: &str = "schedbot";

/// Get XDG data home directory
///
/// Returns `$XDG_DATA_HOME` if set, otherwise defaults to `$HOME/.local/share`
pub fn data_home() -> Option<PathBuf> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data_home.is_empty() {
            return Some(PathBuf::from(xdg_data_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local").join("share"))
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// Default cache directory: `$XDG_DATA_HOME/schedbot/`
pub fn default_data_dir() -> Result<PathBuf, BotError> {
    data_home().map(|home| home.join(APP_DIR)).ok_or_else(|| {
        BotError::ConfigError(
            "Could not determine XDG data home directory (HOME not set); set data_dir".to_string(),
        )
    })
}

/// Global config file: `$XDG_CONFIG_HOME/schedbot/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|home| home.join(APP_DIR).join("config.toml"))
}
