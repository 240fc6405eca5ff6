//! Shared fakes: a scripted transport and a recording poster.

use schedbot::error::{BotError, TransportError};
use schedbot::fetch::{Content, FetchMode, Transport};
use schedbot::post::{PlatformBudget, PostReceipt, PostRequest, PostResults, Poster};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub const FEED_URL: &str = "http://www.bbc.co.uk/programmes/b006m9ry/episodes/upcoming.json";
pub const IMAGE_URL: &str = "http://ichef.bbci.co.uk/images/ic/192x108/p0thumb.jpg";

/// Upcoming-episodes feed with one episode starting at each given RFC 3339 time.
pub fn feed(starts: &[&str]) -> String {
    let broadcasts: Vec<serde_json::Value> = starts
        .iter()
        .enumerate()
        .map(|(i, start)| {
            serde_json::json!({
                "start": start,
                "programme": {
                    "title": format!("Episode {}", i + 1),
                    "position": i + 1,
                    "short_synopsis": "The gang go on an adventure.",
                    "programme": { "position": 3 },
                    "image": { "pid": "p0thumb" }
                }
            })
        })
        .collect();
    serde_json::json!({ "broadcasts": broadcasts }).to_string()
}

/// Serves canned bodies by exact location; anything else is unreachable.
#[derive(Clone, Default)]
pub struct MapTransport {
    pages: Rc<RefCell<BTreeMap<String, Content>>>,
    calls: Rc<RefCell<BTreeMap<String, u32>>>,
}

impl MapTransport {
    pub fn serve(&self, location: &str, content: Content) {
        self.pages.borrow_mut().insert(location.to_string(), content);
    }

    pub fn calls(&self, location: &str) -> u32 {
        self.calls.borrow().get(location).copied().unwrap_or(0)
    }
}

impl Transport for MapTransport {
    fn get(&self, location: &str, _mode: FetchMode) -> Result<Content, TransportError> {
        *self.calls.borrow_mut().entry(location.to_string()).or_insert(0) += 1;
        self.pages
            .borrow()
            .get(location)
            .cloned()
            .ok_or_else(|| TransportError::Connect {
                url: location.to_string(),
                message: "connection refused".to_string(),
            })
    }
}

#[derive(Debug, Clone)]
pub struct Sent {
    pub text: String,
    pub image_bytes: Option<usize>,
    pub in_reply_to: BTreeMap<String, String>,
    pub targets: Vec<String>,
}

/// Accepts every post and remembers it.
#[derive(Clone)]
pub struct RecordingPoster {
    budgets: Vec<PlatformBudget>,
    pub sent: Rc<RefCell<Vec<Sent>>>,
}

impl RecordingPoster {
    pub fn new(budgets: &[(&str, usize)]) -> Self {
        Self {
            budgets: budgets
                .iter()
                .map(|(platform, max_length)| PlatformBudget {
                    platform: platform.to_string(),
                    max_length: *max_length,
                })
                .collect(),
            sent: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl Poster for RecordingPoster {
    fn budgets(&self) -> Vec<PlatformBudget> {
        self.budgets.clone()
    }

    fn post(&self, request: &PostRequest<'_>) -> Result<PostResults, BotError> {
        let call = self.sent.borrow().len();
        self.sent.borrow_mut().push(Sent {
            text: request.text.to_string(),
            image_bytes: request.image.map(|i| i.data.len()),
            in_reply_to: request.in_reply_to.clone(),
            targets: request.targets.clone(),
        });
        Ok(request
            .targets
            .iter()
            .map(|t| {
                (
                    t.clone(),
                    PostReceipt {
                        id: format!("{}-{}", t, call),
                        url: None,
                    },
                )
            })
            .collect())
    }
}
