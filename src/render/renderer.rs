//! PostRenderer: turns one event into ordered, reply-threaded platform posts.

use crate::error::BotError;
use crate::event::{AlertEvent, Image, ImageSource};
use crate::fetch::Fetcher;
use crate::post::{PlatformBudget, PostRequest, Poster};
use crate::render::chain::ReplyChain;
use crate::render::wrap::segment_status;
use crate::types::PlatformName;
use tracing::{debug, info, warn};

/// Segments one platform will receive for a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSegments {
    pub platform: PlatformName,
    pub segments: Vec<String>,
}

/// One collaborator call: the text of segment `round` shared by `targets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub round: usize,
    pub text: String,
    pub targets: Vec<PlatformName>,
}

pub fn plan(status: &str, budgets: &[PlatformBudget], has_image: bool) -> Vec<PlatformSegments> {
    budgets
        .iter()
        .map(|b| PlatformSegments {
            platform: b.platform.clone(),
            segments: segment_status(status, b.max_length, has_image),
        })
        .collect()
}

/// Order the plan into calls: round by round, platforms whose segment text is
/// identical in a round share one call.
pub fn dispatches(plan: &[PlatformSegments]) -> Vec<Dispatch> {
    let rounds = plan.iter().map(|p| p.segments.len()).max().unwrap_or(0);
    let mut out = Vec::new();

    for round in 0..rounds {
        let mut batch: Vec<Dispatch> = Vec::new();
        for platform in plan {
            let Some(text) = platform.segments.get(round) else {
                continue;
            };
            match batch.iter_mut().find(|d| &d.text == text) {
                Some(existing) => existing.targets.push(platform.platform.clone()),
                None => batch.push(Dispatch {
                    round,
                    text: text.clone(),
                    targets: vec![platform.platform.clone()],
                }),
            }
        }
        out.extend(batch);
    }
    out
}

pub struct PostRenderer<'a> {
    poster: &'a dyn Poster,
    fetcher: &'a Fetcher,
}

impl<'a> PostRenderer<'a> {
    pub fn new(poster: &'a dyn Poster, fetcher: &'a Fetcher) -> Self {
        Self { poster, fetcher }
    }

    fn resolve_image(&self, source: Option<&ImageSource>) -> Result<Option<Image>, BotError> {
        match source {
            None => Ok(None),
            Some(ImageSource::Inline(image)) => Ok(Some(image.clone())),
            Some(ImageSource::Remote { url, mime_type }) => Ok(Some(Image {
                data: self.fetcher.fetch_image(url)?,
                mime_type: mime_type.clone(),
            })),
        }
    }

    /// Post every segment of `event` in order. Any failure aborts the rest.
    ///
    /// Returns the number of collaborator calls made.
    pub fn render_and_post(&self, event: &dyn AlertEvent) -> Result<usize, BotError> {
        let status = event.status();
        if status.trim().is_empty() {
            warn!(time = %event.time(), "Event has no status text, nothing posted");
            return Ok(0);
        }
        let image = self.resolve_image(event.image())?;
        let plan = plan(&status, &self.poster.budgets(), image.is_some());
        let calls = dispatches(&plan);
        debug!(
            time = %event.time(),
            calls = calls.len(),
            image = image.is_some(),
            "Rendered event"
        );

        let mut chain = ReplyChain::new();
        for dispatch in &calls {
            let request = PostRequest {
                text: &dispatch.text,
                image: if dispatch.round == 0 { image.as_ref() } else { None },
                in_reply_to: chain.parents_for(&dispatch.targets),
                targets: dispatch.targets.clone(),
            };
            let results = self.poster.post(&request)?;
            chain.record(&dispatch.targets, &results);
        }

        info!(time = %event.time(), calls = calls.len(), "Event posted");
        Ok(calls.len())
    }
}
