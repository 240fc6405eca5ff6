//! Agent profile: config shape and validation.

use crate::agent::broadcast::{BroadcastAgent, BroadcastConfig};
use crate::agent::passes::{PassesAgent, PassesConfig};
use crate::agent::Agent;
use crate::error::BotError;
use serde::{Deserialize, Serialize};

/// Per-agent configuration, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AgentConfig {
    Broadcast(BroadcastConfig),
    Passes(PassesConfig),
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            AgentConfig::Broadcast(config) => config.validate(),
            AgentConfig::Passes(config) => config.validate(),
        }
    }

    pub fn build(&self, name: &str) -> Result<Box<dyn Agent>, BotError> {
        Ok(match self {
            AgentConfig::Broadcast(config) => Box::new(BroadcastAgent::new(name, config.clone())?),
            AgentConfig::Passes(config) => Box::new(PassesAgent::new(name, config.clone())?),
        })
    }
}
