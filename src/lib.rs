//! Schedbot: Post Ahead of Scheduled Events
//!
//! Notification agents that cache an external schedule, decide when an event
//! is imminent and publish a reply-threaded status on one or more social
//! platforms. Each invocation performs exactly one action.

pub mod agent;
pub mod cache;
pub mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod fetch;
pub mod logging;
pub mod post;
pub mod render;
pub mod tooling;
pub mod types;
pub mod window;
