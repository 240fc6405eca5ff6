use crate::error::BotError;
use crate::event::Image;
use crate::post::contract::PostReceipt;
use crate::post::platform::PlatformClient;
use std::cell::Cell;

/// Prints posts to stdout instead of sending them. Used for dry runs.
pub struct ConsoleClient {
    name: String,
    max_length: usize,
    sent: Cell<u64>,
}

impl ConsoleClient {
    pub fn new(name: &str, max_length: usize) -> Self {
        Self {
            name: name.to_string(),
            max_length,
            sent: Cell::new(0),
        }
    }
}

impl PlatformClient for ConsoleClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_length(&self) -> usize {
        self.max_length
    }

    fn send(
        &self,
        text: &str,
        image: Option<&Image>,
        in_reply_to: Option<&str>,
    ) -> Result<PostReceipt, BotError> {
        let n = self.sent.get() + 1;
        self.sent.set(n);
        let id = format!("{}-{}", self.name, n);

        let mut line = format!("[{}] {}", id, text);
        if let Some(parent) = in_reply_to {
            line.push_str(&format!(" (reply to {})", parent));
        }
        if let Some(image) = image {
            line.push_str(&format!(" [{} {} bytes]", image.mime_type, image.data.len()));
        }
        println!("{}", line);

        Ok(PostReceipt { id, url: None })
    }
}
