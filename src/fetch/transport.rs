use crate::error::TransportError;

/// How the body of a fetched resource should be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Text,
    Binary,
}

/// Body of a fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Text(s) => s.is_empty(),
            Content::Binary(b) => b.is_empty(),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Content::Text(s) => s,
            Content::Binary(b) => String::from_utf8_lossy(&b).into_owned(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Text(s) => s.into_bytes(),
            Content::Binary(b) => b,
        }
    }
}

/// Anything naming an http(s) URL is remote; everything else is a local path.
pub fn is_remote(location: &str) -> bool {
    location.contains("http://") || location.contains("https://")
}

/// Blocking retrieval of a URL or local path.
///
/// Text fetches return the body whatever the HTTP status, so failure pages
/// reach the corruption check. Binary fetches fail on a non-success status.
pub trait Transport {
    fn get(&self, location: &str, mode: FetchMode) -> Result<Content, TransportError>;
}
