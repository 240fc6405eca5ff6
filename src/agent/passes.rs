//! Satellite passes agent.
//!
//! Scrapes a heavens-above pass summary table into a TSV slot, and pairs each
//! pass with the latest cached weather summary. Alerts go out 25 to 30 minutes
//! before a pass begins.

use crate::agent::{Agent, AgentContext};
use crate::cache::content_differs;
use crate::driver::Action;
use crate::error::BotError;
use crate::event::{sort_by_time, AlertEvent, EventList};
use crate::types::Timestamp;
use crate::window::AlertWindow;
use chrono::{Datelike, Duration, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const PASSES: &str = "iss";
const WEATHER: &str = "weather";

/// Date layouts seen in the pass table, each prefixed with the year we assume.
const PASS_TIME_FORMATS: &[&str] = &[
    "%Y %d %b %H:%M:%S",
    "%Y %b %d, %H:%M:%S",
    "%Y %b %d %I:%M:%S %p",
];

fn default_satellite_id() -> u32 {
    25544
}

fn default_satellite_name() -> String {
    "ISS".to_string()
}

fn default_passes_url() -> String {
    "http://www.heavens-above.com/PassSummary.aspx?satid={satid}&lat={lat}&lng={lng}&alt={alt}&tz=GMT"
        .to_string()
}

fn default_opens_minutes() -> i64 {
    -30
}

fn default_closes_minutes() -> i64 {
    -25
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassesConfig {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above sea level.
    #[serde(default)]
    pub altitude: i32,

    #[serde(default = "default_satellite_id")]
    pub satellite_id: u32,

    #[serde(default = "default_satellite_name")]
    pub satellite_name: String,

    #[serde(default = "default_passes_url")]
    pub passes_url: String,

    /// Forecast endpoint returning JSON with a `currently.summary` field.
    /// When set, passes are only reported once weather has been cached.
    #[serde(default)]
    pub weather_url: Option<String>,

    #[serde(default = "default_opens_minutes")]
    pub opens_minutes: i64,

    #[serde(default = "default_closes_minutes")]
    pub closes_minutes: i64,
}

impl PassesConfig {
    pub fn at(latitude: f64, longitude: f64, altitude: i32) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            satellite_id: default_satellite_id(),
            satellite_name: default_satellite_name(),
            passes_url: default_passes_url(),
            weather_url: None,
            opens_minutes: default_opens_minutes(),
            closes_minutes: default_closes_minutes(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude out of range: {}", self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("longitude out of range: {}", self.longitude));
        }
        if self.opens_minutes >= self.closes_minutes {
            return Err(format!(
                "alert window is empty: opens at {} but closes at {} minutes",
                self.opens_minutes, self.closes_minutes
            ));
        }
        Ok(())
    }

    fn passes_url(&self) -> String {
        self.passes_url
            .replace("{satid}", &self.satellite_id.to_string())
            .replace("{lat}", &format!("{:.6}", self.latitude))
            .replace("{lng}", &format!("{:.6}", self.longitude))
            .replace("{alt}", &self.altitude.to_string())
    }
}

/// One predicted pass, as cached in the TSV slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PassEvent {
    pub time: Timestamp,
    pub satellite: String,
    pub magnitude: f64,
    pub start_time: String,
    pub end_time: String,
    pub start_az: String,
    pub end_az: String,
    pub max_time: String,
    pub max_alt: String,
    pub max_az: String,
    pub weather: Option<String>,
}

impl AlertEvent for PassEvent {
    fn time(&self) -> Timestamp {
        self.time
    }

    fn status(&self) -> String {
        let mut text = format!(
            "{} pass: magnitude {:.1}, {}\u{2013}{} from {} to {}, maximum altitude {} at {} in {}.",
            self.satellite,
            self.magnitude,
            self.start_time,
            self.end_time,
            self.start_az,
            self.end_az,
            self.max_alt,
            self.max_time,
            self.max_az
        );
        if let Some(weather) = &self.weather {
            text.push_str(&format!(" Weather: {}.", weather));
        }
        text
    }
}

/// Start of a pass given the table's date and time columns.
///
/// The table omits the year: assume the current one, and roll a date already
/// behind `now` into the next.
pub fn pass_timestamp(date: &str, time: &str, now: Timestamp) -> Option<Timestamp> {
    let text = format!("{} {} {}", now.year(), date.trim(), time.trim());
    let naive = PASS_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())?;
    let start = Utc.from_utc_datetime(&naive);
    if start < now {
        start.with_year(now.year() + 1)
    } else {
        Some(start)
    }
}

pub struct PassesAgent {
    name: String,
    config: PassesConfig,
    row: Regex,
    window: AlertWindow,
}

impl PassesAgent {
    pub fn new(name: &str, config: PassesConfig) -> Result<Self, BotError> {
        config
            .validate()
            .map_err(|e| BotError::ConfigError(format!("Agent {}: {}", name, e)))?;
        let pattern = format!(
            r#"<tr class="clickableRow"[^>]*>\s*<td><a href="[^"]*" title="[^"]*">(.*?)</a></td>{}"#,
            r"<td[^>]*>\s*(.*?)\s*</td>".repeat(11)
        );
        let row = Regex::new(&pattern)
            .map_err(|e| BotError::ConfigError(format!("Agent {}: {}", name, e)))?;
        let window = AlertWindow::new(
            Duration::minutes(config.opens_minutes),
            Duration::minutes(config.closes_minutes),
        );
        Ok(Self {
            name: name.to_string(),
            config,
            row,
            window,
        })
    }

    /// Pass table rows as TSV: epoch, magnitude, start, end, start azimuth,
    /// end azimuth, max time, max altitude, max azimuth.
    pub fn scrape(&self, html: &str, now: Timestamp) -> String {
        let mut out = String::new();
        for caps in self.row.captures_iter(html) {
            let col = |i: usize| caps.get(i).map_or("", |m| m.as_str());
            let (date, mag, start_time) = (col(1), col(2), col(3));
            let (start_az, max_time, max_alt, max_az) = (col(5), col(6), col(7), col(8));
            let (end_time, end_az) = (col(9), col(11));

            let Some(start) = pass_timestamp(date, start_time, now) else {
                debug!(agent = %self.name, date, start_time, "Skipping pass with unreadable date");
                continue;
            };
            let fields = [
                start.timestamp().to_string(),
                mag.to_string(),
                start_time.to_string(),
                end_time.to_string(),
                start_az.to_string(),
                end_az.to_string(),
                max_time.to_string(),
                max_alt.to_string(),
                max_az.to_string(),
            ];
            out.push_str(&fields.join("\t"));
            out.push('\n');
        }
        out
    }

    pub fn parse_passes(&self, tsv: &str, weather: Option<&str>) -> EventList {
        let mut events: EventList = Vec::new();
        for line in tsv.lines().filter(|l| !l.trim().is_empty()) {
            match self.parse_row(line, weather) {
                Some(event) => events.push(Box::new(event)),
                None => {
                    debug!(agent = %self.name, line, "Malformed pass row");
                    return Vec::new();
                }
            }
        }
        sort_by_time(&mut events);
        events
    }

    fn parse_row(&self, line: &str, weather: Option<&str>) -> Option<PassEvent> {
        let f: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        if f.len() != 9 {
            return None;
        }
        let epoch: i64 = f[0].parse().ok()?;
        Some(PassEvent {
            time: Utc.timestamp_opt(epoch, 0).single()?,
            satellite: self.config.satellite_name.clone(),
            magnitude: f[1].parse().ok()?,
            start_time: f[2].to_string(),
            end_time: f[3].to_string(),
            start_az: f[4].to_string(),
            end_az: f[5].to_string(),
            max_time: f[6].to_string(),
            max_alt: f[7].to_string(),
            max_az: f[8].to_string(),
            weather: weather.map(str::to_string),
        })
    }

    /// Summary line from cached weather JSON.
    fn weather_summary(content: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(content).ok()?;
        value
            .get("summary")
            .and_then(|s| s.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

impl Agent for PassesAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, action: Action) -> bool {
        match action {
            Action::Weather => self.config.weather_url.is_some(),
            _ => true,
        }
    }

    fn fetch(&self, ctx: &AgentContext<'_>) -> Result<bool, BotError> {
        let html = ctx.fetcher.fetch_text(&self.config.passes_url())?;
        let tsv = self.scrape(&html, ctx.now);
        let cache = ctx.cache(&self.name, PASSES);
        Ok(cache.commit_if_changed(&tsv, content_differs, None)?)
    }

    fn parse(&self, ctx: &AgentContext<'_>, warn_if_missing: bool) -> Result<EventList, BotError> {
        let weather = match &self.config.weather_url {
            Some(_) => {
                let cached = ctx.cache(&self.name, WEATHER).read_effective(warn_if_missing)?;
                match cached.as_deref().and_then(Self::weather_summary) {
                    Some(summary) => Some(summary),
                    None => {
                        debug!(agent = %self.name, "No usable weather, reporting no passes");
                        return Ok(Vec::new());
                    }
                }
            }
            None => None,
        };

        let cache = ctx.cache(&self.name, PASSES);
        Ok(match cache.read_effective(warn_if_missing)? {
            Some(tsv) => self.parse_passes(&tsv, weather.as_deref()),
            None => Vec::new(),
        })
    }

    fn in_window(&self, event: &dyn AlertEvent, now: Timestamp) -> bool {
        self.window.contains(event.time(), now)
    }

    fn refresh_weather(&self, ctx: &AgentContext<'_>) -> Result<bool, BotError> {
        let Some(url) = &self.config.weather_url else {
            return Err(BotError::UnsupportedAction {
                agent: self.name.clone(),
                action: Action::Weather.to_string(),
            });
        };
        let url = url
            .replace("{lat}", &self.config.latitude.to_string())
            .replace("{lng}", &self.config.longitude.to_string());
        let body = ctx.fetcher.fetch_text(&url)?;
        if body.is_empty() {
            return Ok(false);
        }
        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) => {
                warn!(agent = %self.name, error = %e, "Weather response is not JSON");
                return Ok(false);
            }
        };
        let current = value.get("currently").unwrap_or(&value);
        let stored = serde_json::to_string(current)
            .map_err(|e| BotError::ConfigError(format!("Unable to encode weather: {}", e)))?;
        let cache = ctx.cache(&self.name, WEATHER);
        Ok(cache.commit_if_changed(&stored, content_differs, None)?)
    }
}
