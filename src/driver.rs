//! Driver: runs exactly one action for one agent per invocation.

use crate::agent::{Agent, AgentContext};
use crate::cache::SlotStorage;
use crate::error::BotError;
use crate::event::{sort_by_time, EventList};
use crate::fetch::Fetcher;
use crate::post::Poster;
use crate::render::PostRenderer;
use crate::types::Timestamp;
use crate::window::select;
use chrono::Utc;
use clap::ValueEnum;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Action {
    /// Refresh cached source data
    Fetch,
    /// List every parsed event, ignoring alert windows
    Test,
    /// Post events whose alert window is open now
    Post,
    /// Refresh cached weather (passes agents)
    Weather,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Fetch => "fetch",
            Action::Test => "test",
            Action::Post => "post",
            Action::Weather => "weather",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-invocation inputs besides the action itself.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Post even when no event is in its window (`--setup`).
    pub force_post: bool,
    pub now: Timestamp,
}

impl RunOptions {
    pub fn at(now: Timestamp) -> Self {
        Self { force_post: false, now }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

type Handler = fn(&Driver, &RunOptions) -> Result<String, BotError>;

const ACTIONS: &[(Action, Handler)] = &[
    (Action::Fetch, run_fetch),
    (Action::Test, run_test),
    (Action::Post, run_post),
    (Action::Weather, run_weather),
];

pub struct Driver {
    agent: Box<dyn Agent>,
    storage: Box<dyn SlotStorage>,
    fetcher: Fetcher,
    poster: Box<dyn Poster>,
}

impl Driver {
    pub fn new(
        agent: Box<dyn Agent>,
        storage: Box<dyn SlotStorage>,
        fetcher: Fetcher,
        poster: Box<dyn Poster>,
    ) -> Self {
        Self {
            agent,
            storage,
            fetcher,
            poster,
        }
    }

    fn context(&self, now: Timestamp) -> AgentContext<'_> {
        AgentContext {
            storage: self.storage.as_ref(),
            fetcher: &self.fetcher,
            now,
        }
    }

    /// Run `action`, returning the operator report (possibly empty).
    pub fn execute(&self, action: Action, opts: &RunOptions) -> Result<String, BotError> {
        let unsupported = || BotError::UnsupportedAction {
            agent: self.agent.name().to_string(),
            action: action.to_string(),
        };
        if !self.agent.supports(action) {
            return Err(unsupported());
        }
        let handler = ACTIONS
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, h)| *h)
            .ok_or_else(unsupported)?;

        debug!(agent = %self.agent.name(), action = %action, now = %opts.now, "Running action");
        handler(self, opts)
    }
}

fn run_fetch(driver: &Driver, opts: &RunOptions) -> Result<String, BotError> {
    let updated = driver.agent.fetch(&driver.context(opts.now))?;
    if !updated {
        info!(agent = %driver.agent.name(), "No new schedule");
        return Ok(String::new());
    }
    let listing = run_test(driver, opts)?;
    Ok(format!("New schedule downloaded\n{}", listing))
}

fn run_test(driver: &Driver, opts: &RunOptions) -> Result<String, BotError> {
    let events = driver.agent.parse(&driver.context(opts.now), true)?;
    Ok(format_events(&events))
}

fn run_post(driver: &Driver, opts: &RunOptions) -> Result<String, BotError> {
    let agent = driver.agent.as_ref();
    let events = agent.parse(&driver.context(opts.now), false)?;
    let mut due = select(events, opts.now, |event, now| agent.in_window(event, now));
    if due.is_empty() && !opts.force_post {
        debug!(agent = %agent.name(), "Nothing in window");
        return Ok(String::new());
    }
    sort_by_time(&mut due);

    if driver.poster.budgets().is_empty() {
        warn!(agent = %agent.name(), "No platforms configured, posts go nowhere");
    }
    info!("Posting at {}", opts.now.to_rfc3339());

    let renderer = PostRenderer::new(driver.poster.as_ref(), &driver.fetcher);
    let mut calls = 0;
    for event in &due {
        calls += renderer.render_and_post(event.as_ref())?;
    }
    Ok(format!("Posted {} event(s) in {} message(s)", due.len(), calls))
}

fn run_weather(driver: &Driver, opts: &RunOptions) -> Result<String, BotError> {
    if driver.agent.refresh_weather(&driver.context(opts.now))? {
        Ok("Weather updated".to_string())
    } else {
        Ok(String::new())
    }
}

/// Event listing for the `test` action.
pub fn format_events(events: &EventList) -> String {
    if events.is_empty() {
        return "No events.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Time", "Status", "Image"]);
    for event in events {
        table.add_row(vec![
            event.time().to_rfc3339(),
            event.status(),
            event.image().map(|i| i.label()).unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.to_string()
}
