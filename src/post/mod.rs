//! Posting collaborators: fan-out of one status to the configured platforms.

pub mod console;
pub mod contract;
pub mod mastodon;
pub mod platform;

pub use console::ConsoleClient;
pub use contract::{PlatformBudget, PostReceipt, PostRequest, PostResults, Poster};
pub use mastodon::MastodonClient;
pub use platform::{PlatformClient, PlatformSet};
