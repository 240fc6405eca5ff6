use crate::error::BotError;
use crate::event::Image;
use crate::types::{MessageId, PlatformName};
use std::collections::BTreeMap;

/// Length limit of a single message on one platform, in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformBudget {
    pub platform: PlatformName,
    pub max_length: usize,
}

/// One message to send to a set of platforms.
#[derive(Debug, Clone)]
pub struct PostRequest<'a> {
    pub text: &'a str,
    pub image: Option<&'a Image>,
    /// Reply parent per platform; platforms without an entry post top-level.
    pub in_reply_to: BTreeMap<PlatformName, MessageId>,
    pub targets: Vec<PlatformName>,
}

/// What a platform returned for an accepted post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReceipt {
    pub id: MessageId,
    pub url: Option<String>,
}

/// Accepted posts keyed by platform. A missing key means the platform did not accept.
pub type PostResults = BTreeMap<PlatformName, PostReceipt>;

/// Posting collaborator.
pub trait Poster {
    fn budgets(&self) -> Vec<PlatformBudget>;
    fn post(&self, request: &PostRequest<'_>) -> Result<PostResults, BotError>;
}
