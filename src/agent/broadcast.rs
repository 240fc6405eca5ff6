//! Broadcast agent: posts shortly before episodes of a TV programme air.
//!
//! Source is the programme's upcoming-episodes JSON feed. Each event carries the
//! episode thumbnail, fetched when the event is posted.

use crate::agent::{Agent, AgentContext};
use crate::cache::content_differs;
use crate::error::BotError;
use crate::event::{sort_by_time, AlertEvent, EventList, ImageSource};
use crate::types::Timestamp;
use crate::window::AlertWindow;
use chrono::Duration;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SCHEDULE: &str = "schedule";

fn default_feed_url() -> String {
    "http://www.bbc.co.uk/programmes/{pid}/episodes/upcoming.json".to_string()
}

fn default_image_url() -> String {
    "http://ichef.bbci.co.uk/images/ic/192x108/{pid}.jpg".to_string()
}

fn default_corruption_pattern() -> String {
    "Maintenance mode".to_string()
}

fn default_lead_minutes() -> i64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// Programme identifier substituted for `{pid}` in `feed_url`.
    pub programme: String,

    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Thumbnail URL; `{pid}` is the episode image id.
    #[serde(default = "default_image_url")]
    pub image_url: String,

    /// Regex matching the feed's failure page.
    #[serde(default = "default_corruption_pattern")]
    pub corruption_pattern: String,

    /// Minutes before start the alert window opens.
    #[serde(default = "default_lead_minutes")]
    pub lead_minutes: i64,
}

impl BroadcastConfig {
    pub fn for_programme(programme: &str) -> Self {
        Self {
            programme: programme.to_string(),
            feed_url: default_feed_url(),
            image_url: default_image_url(),
            corruption_pattern: default_corruption_pattern(),
            lead_minutes: default_lead_minutes(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.programme.trim().is_empty() {
            return Err("programme cannot be empty".to_string());
        }
        if self.lead_minutes <= 0 {
            return Err(format!("lead_minutes must be positive, got {}", self.lead_minutes));
        }
        Regex::new(&self.corruption_pattern)
            .map(|_| ())
            .map_err(|e| format!("invalid corruption_pattern: {}", e))
    }
}

#[derive(Debug, Deserialize)]
struct UpcomingFeed {
    #[serde(default)]
    broadcasts: Vec<FeedBroadcast>,
}

#[derive(Debug, Deserialize)]
struct FeedBroadcast {
    start: Timestamp,
    programme: FeedEpisode,
}

#[derive(Debug, Deserialize)]
struct FeedEpisode {
    title: String,
    #[serde(default)]
    position: Option<u32>,
    #[serde(default)]
    short_synopsis: String,
    /// Parent series.
    #[serde(default)]
    programme: Option<FeedSeries>,
    #[serde(default)]
    image: Option<FeedImage>,
}

#[derive(Debug, Deserialize)]
struct FeedSeries {
    #[serde(default)]
    position: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct FeedImage {
    pid: String,
}

/// One upcoming episode broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeEvent {
    pub time: Timestamp,
    pub title: String,
    pub series: Option<u32>,
    pub episode: Option<u32>,
    pub synopsis: String,
    pub image: Option<ImageSource>,
}

fn position(p: Option<u32>) -> String {
    p.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string())
}

impl AlertEvent for EpisodeEvent {
    fn time(&self) -> Timestamp {
        self.time
    }

    fn status(&self) -> String {
        format!(
            "{} (s{}e{}) starting shortly!\n\u{201c}{}\u{201d}",
            self.title,
            position(self.series),
            position(self.episode),
            self.synopsis
        )
    }

    fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }
}

pub struct BroadcastAgent {
    name: String,
    config: BroadcastConfig,
    corruption: Regex,
    window: AlertWindow,
}

impl BroadcastAgent {
    pub fn new(name: &str, config: BroadcastConfig) -> Result<Self, BotError> {
        config
            .validate()
            .map_err(|e| BotError::ConfigError(format!("Agent {}: {}", name, e)))?;
        let corruption = Regex::new(&config.corruption_pattern)
            .map_err(|e| BotError::ConfigError(format!("Agent {}: {}", name, e)))?;
        let window = AlertWindow::before(Duration::minutes(config.lead_minutes));
        Ok(Self {
            name: name.to_string(),
            config,
            corruption,
            window,
        })
    }

    fn feed_url(&self) -> String {
        self.config.feed_url.replace("{pid}", &self.config.programme)
    }

    /// Episodes in a feed document; anything unreadable yields none.
    pub fn parse_feed(&self, content: &str) -> EventList {
        let feed: UpcomingFeed = match serde_json::from_str(content) {
            Ok(feed) => feed,
            Err(e) => {
                debug!(agent = %self.name, error = %e, "Schedule not parseable");
                return Vec::new();
            }
        };

        let mut events: EventList = feed
            .broadcasts
            .into_iter()
            .map(|b| {
                let image = b
                    .programme
                    .image
                    .as_ref()
                    .map(|img| ImageSource::jpeg_url(self.config.image_url.replace("{pid}", &img.pid)));
                Box::new(EpisodeEvent {
                    time: b.start,
                    title: b.programme.title,
                    series: b.programme.programme.and_then(|s| s.position),
                    episode: b.programme.position,
                    synopsis: b.programme.short_synopsis,
                    image,
                }) as Box<dyn AlertEvent>
            })
            .collect();
        sort_by_time(&mut events);
        events
    }
}

impl Agent for BroadcastAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, ctx: &AgentContext<'_>) -> Result<bool, BotError> {
        let new = ctx.fetcher.fetch_text(&self.feed_url())?;
        let cache = ctx.cache(&self.name, SCHEDULE);
        Ok(cache.commit_if_changed(&new, content_differs, Some(&self.corruption))?)
    }

    fn parse(&self, ctx: &AgentContext<'_>, warn_if_missing: bool) -> Result<EventList, BotError> {
        let cache = ctx.cache(&self.name, SCHEDULE);
        Ok(match cache.read_effective(warn_if_missing)? {
            Some(content) => self.parse_feed(&content),
            None => Vec::new(),
        })
    }

    fn in_window(&self, event: &dyn AlertEvent, now: Timestamp) -> bool {
        self.window.contains(event.time(), now)
    }
}
