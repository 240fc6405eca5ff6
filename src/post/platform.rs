use crate::config::{HttpConfig, PlatformConfig, PlatformKind};
use crate::error::BotError;
use crate::event::Image;
use crate::post::console::ConsoleClient;
use crate::post::contract::{PlatformBudget, PostReceipt, PostRequest, PostResults, Poster};
use crate::post::mastodon::MastodonClient;
use tracing::{info, warn};

/// A single social platform account.
pub trait PlatformClient {
    fn name(&self) -> &str;
    fn max_length(&self) -> usize;
    fn send(
        &self,
        text: &str,
        image: Option<&Image>,
        in_reply_to: Option<&str>,
    ) -> Result<PostReceipt, BotError>;
}

/// Fans a post out to every targeted platform.
///
/// A platform that errors is left out of the results. The set as a whole
/// fails only when no targeted platform accepted the post.
pub struct PlatformSet {
    clients: Vec<Box<dyn PlatformClient>>,
}

impl PlatformSet {
    pub fn new(clients: Vec<Box<dyn PlatformClient>>) -> Self {
        Self { clients }
    }

    pub fn from_config(platforms: &[PlatformConfig], http: &HttpConfig) -> Result<Self, BotError> {
        let mut clients: Vec<Box<dyn PlatformClient>> = Vec::with_capacity(platforms.len());
        for platform in platforms {
            let client: Box<dyn PlatformClient> = match platform.kind {
                PlatformKind::Console => {
                    Box::new(ConsoleClient::new(&platform.name, platform.max_length))
                }
                PlatformKind::Mastodon => Box::new(MastodonClient::from_config(platform, http)?),
            };
            clients.push(client);
        }
        Ok(Self::new(clients))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Poster for PlatformSet {
    fn budgets(&self) -> Vec<PlatformBudget> {
        self.clients
            .iter()
            .map(|c| PlatformBudget {
                platform: c.name().to_string(),
                max_length: c.max_length(),
            })
            .collect()
    }

    fn post(&self, request: &PostRequest<'_>) -> Result<PostResults, BotError> {
        let mut results = PostResults::new();
        let mut failures = Vec::new();

        for client in &self.clients {
            if !request.targets.iter().any(|t| t == client.name()) {
                continue;
            }
            let parent = request.in_reply_to.get(client.name()).map(String::as_str);
            match client.send(request.text, request.image, parent) {
                Ok(receipt) => {
                    info!(
                        platform = client.name(),
                        id = %receipt.id,
                        reply_to = parent.unwrap_or("-"),
                        "Posted"
                    );
                    results.insert(client.name().to_string(), receipt);
                }
                Err(e) => {
                    warn!(platform = client.name(), error = %e, "Platform rejected post");
                    failures.push(format!("{}: {}", client.name(), e));
                }
            }
        }

        if results.is_empty() && !request.targets.is_empty() {
            return Err(BotError::PostFailed(if failures.is_empty() {
                format!("no configured platform among {:?}", request.targets)
            } else {
                failures.join("; ")
            }));
        }
        Ok(results)
    }
}
