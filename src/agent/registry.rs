//! Agent registry: named agents from configuration.

use crate::agent::profile::AgentConfig;
use crate::agent::Agent;
use crate::config::BotConfig;
use crate::error::BotError;
use std::collections::BTreeMap;

pub struct AgentRegistry {
    agents: BTreeMap<String, AgentConfig>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            agents: config.agents.clone(),
        }
    }

    pub fn register(&mut self, name: &str, config: AgentConfig) {
        self.agents.insert(name.to_string(), config);
    }

    pub fn names(&self) -> Vec<&str> {
        self.agents.keys().map(String::as_str).collect()
    }

    pub fn build(&self, name: &str) -> Result<Box<dyn Agent>, BotError> {
        let config = self.agents.get(name).ok_or_else(|| {
            let known = self.names().join(", ");
            BotError::UnknownAgent(if known.is_empty() {
                format!("{} (no agents configured)", name)
            } else {
                format!("{} (configured: {})", name, known)
            })
        })?;
        config.build(name)
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
