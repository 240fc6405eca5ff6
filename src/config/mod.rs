//! Configuration: shape, validation and layered loading.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::agent::AgentConfig;
use crate::error::BotError;
use crate::logging::LoggingConfig;
use crate::render::{CONTINUATION_RESERVE, IMAGE_RESERVATION};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/68.0.3440.106 Safari/537.36";

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_max_length() -> usize {
    500
}

/// Outbound HTTP settings shared by sources and platforms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Sent with every request; some schedule sites refuse unknown agents.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout; None keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

/// Platform client implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Print to stdout.
    #[default]
    Console,
    Mastodon,
}

/// One account statuses are posted to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub name: String,

    #[serde(default)]
    pub kind: PlatformKind,

    /// Characters per message.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BotConfig {
    /// Cache directory; defaults to `$XDG_DATA_HOME/schedbot`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub platforms: Vec<PlatformConfig>,

    #[serde(default)]
    pub agents: BTreeMap<String, AgentConfig>,
}

impl BotConfig {
    pub fn validate(&self) -> Result<(), BotError> {
        let mut seen = HashSet::new();
        for platform in &self.platforms {
            if platform.name.trim().is_empty() {
                return Err(BotError::ConfigError(
                    "Platform name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(platform.name.as_str()) {
                return Err(BotError::ConfigError(format!(
                    "Duplicate platform name: {}",
                    platform.name
                )));
            }
            let minimum = IMAGE_RESERVATION + CONTINUATION_RESERVE + 1;
            if platform.max_length < minimum {
                return Err(BotError::ConfigError(format!(
                    "Platform {} max_length must be at least {}, got {}",
                    platform.name, minimum, platform.max_length
                )));
            }
            if platform.kind == PlatformKind::Mastodon
                && (platform.instance.is_none() || platform.access_token.is_none())
            {
                return Err(BotError::ConfigError(format!(
                    "Platform {} needs both instance and access_token",
                    platform.name
                )));
            }
        }

        for (name, agent) in &self.agents {
            agent
                .validate()
                .map_err(|e| BotError::ConfigError(format!("Agent {}: {}", name, e)))?;
        }
        Ok(())
    }

    /// Directory holding every agent's cache slots.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, BotError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::default_data_dir(),
        }
    }
}
