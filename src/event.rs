//! Events: what an agent found in its source and may post about.

use crate::types::Timestamp;

/// Binary image attached to the lead segment of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Where an event's image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Already in memory.
    Inline(Image),
    /// Fetched through the Fetcher when the event is posted.
    Remote { url: String, mime_type: String },
}

impl ImageSource {
    pub fn jpeg_url(url: impl Into<String>) -> Self {
        ImageSource::Remote {
            url: url.into(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    /// Short label for operator reports.
    pub fn label(&self) -> String {
        match self {
            ImageSource::Inline(image) => {
                format!("inline {} ({} bytes)", image.mime_type, image.data.len())
            }
            ImageSource::Remote { url, .. } => url.clone(),
        }
    }
}

/// Capability every per-agent event record provides to the renderer.
pub trait AlertEvent {
    fn time(&self) -> Timestamp;
    fn status(&self) -> String;
    fn image(&self) -> Option<&ImageSource> {
        None
    }
}

/// Plain event record for agents that need nothing beyond the shared fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub time: Timestamp,
    pub status: String,
    pub image: Option<ImageSource>,
}

impl ScheduledEvent {
    pub fn new(time: Timestamp, status: impl Into<String>) -> Self {
        Self {
            time,
            status: status.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageSource) -> Self {
        self.image = Some(image);
        self
    }
}

impl AlertEvent for ScheduledEvent {
    fn time(&self) -> Timestamp {
        self.time
    }

    fn status(&self) -> String {
        self.status.clone()
    }

    fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }
}

pub type EventList = Vec<Box<dyn AlertEvent>>;

/// Stable ascending sort by event time.
pub fn sort_by_time(events: &mut EventList) {
    events.sort_by_key(|e| e.time());
}
