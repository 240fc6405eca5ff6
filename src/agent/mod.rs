//! Agents: per-source fetch, parse and alert-window rules.
//!
//! An agent owns everything specific to its source. The pipeline only sees the
//! [`Agent`] trait and the events it yields.

pub mod broadcast;
pub mod passes;
pub mod profile;
pub mod registry;

pub use broadcast::{BroadcastAgent, BroadcastConfig};
pub use passes::{PassesAgent, PassesConfig};
pub use profile::AgentConfig;
pub use registry::AgentRegistry;

use crate::cache::{CacheStore, SlotKey, SlotStorage};
use crate::driver::Action;
use crate::error::BotError;
use crate::event::{AlertEvent, EventList};
use crate::fetch::Fetcher;
use crate::types::Timestamp;

/// What an agent may touch during one invocation.
pub struct AgentContext<'a> {
    pub storage: &'a dyn SlotStorage,
    pub fetcher: &'a Fetcher,
    pub now: Timestamp,
}

impl<'a> AgentContext<'a> {
    pub fn cache(&self, agent: &str, kind: &str) -> CacheStore<'a> {
        CacheStore::new(self.storage, SlotKey::new(agent, kind))
    }
}

pub trait Agent {
    fn name(&self) -> &str;

    fn supports(&self, action: Action) -> bool {
        matches!(action, Action::Fetch | Action::Test | Action::Post)
    }

    /// Refresh cached source data. Returns true when new content was committed.
    fn fetch(&self, ctx: &AgentContext<'_>) -> Result<bool, BotError>;

    /// Events from the effective cached content, ascending by time.
    ///
    /// Malformed content yields an empty list, never an error; only cache I/O
    /// failures propagate.
    fn parse(&self, ctx: &AgentContext<'_>, warn_if_missing: bool) -> Result<EventList, BotError>;

    fn in_window(&self, event: &dyn AlertEvent, now: Timestamp) -> bool;

    /// Refresh auxiliary weather data. Returns true when it changed.
    fn refresh_weather(&self, _ctx: &AgentContext<'_>) -> Result<bool, BotError> {
        Err(BotError::UnsupportedAction {
            agent: self.name().to_string(),
            action: Action::Weather.to_string(),
        })
    }
}
