use crate::error::{BotError, TransportError};
use crate::fetch::transport::{Content, FetchMode, Transport};
use tracing::{debug, warn};

/// Attempts made for an image before giving up.
pub const IMAGE_FETCH_ATTEMPTS: u32 = 3;

/// Source retrieval policy on top of a [`Transport`].
pub struct Fetcher {
    transport: Box<dyn Transport>,
}

impl Fetcher {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch a URL or path as text. An unreachable host yields empty content.
    pub fn fetch_text(&self, location: &str) -> Result<String, BotError> {
        Ok(self.fetch(location, FetchMode::Text)?.into_text())
    }

    /// Fetch a URL or path as bytes. An unreachable host yields empty content.
    pub fn fetch_bytes(&self, location: &str) -> Result<Vec<u8>, BotError> {
        Ok(self.fetch(location, FetchMode::Binary)?.into_bytes())
    }

    fn fetch(&self, location: &str, mode: FetchMode) -> Result<Content, BotError> {
        match self.transport.get(location, mode) {
            Ok(content) => {
                debug!(location, bytes = content_len(&content), "Fetched");
                Ok(content)
            }
            Err(TransportError::Connect { url, message }) => {
                warn!(url = %url, error = %message, "Source unreachable, treating as empty");
                Ok(match mode {
                    FetchMode::Text => Content::Text(String::new()),
                    FetchMode::Binary => Content::Binary(Vec::new()),
                })
            }
            Err(e) => Err(BotError::TransportError(e)),
        }
    }

    /// Fetch image bytes, retrying any transport failure or empty body.
    pub fn fetch_image(&self, url: &str) -> Result<Vec<u8>, BotError> {
        let mut last_error = None;
        for attempt in 1..=IMAGE_FETCH_ATTEMPTS {
            match self.transport.get(url, FetchMode::Binary) {
                Ok(content) if !content.is_empty() => return Ok(content.into_bytes()),
                Ok(_) => {
                    warn!(url, attempt, "Image body empty");
                    last_error = Some(TransportError::Empty {
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    warn!(url, attempt, error = %e, "Image fetch failed");
                    last_error = Some(e);
                }
            }
        }
        Err(BotError::ImageFetchExhausted {
            url: url.to_string(),
            attempts: IMAGE_FETCH_ATTEMPTS,
            last_error: last_error.unwrap_or(TransportError::Empty {
                url: url.to_string(),
            }),
        })
    }
}

fn content_len(content: &Content) -> usize {
    match content {
        Content::Text(s) => s.len(),
        Content::Binary(b) => b.len(),
    }
}
