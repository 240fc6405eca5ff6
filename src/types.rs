//! Core types shared across the pipeline.

use chrono::{DateTime, Utc};

/// Timestamp: absolute instant an event happens at
pub type Timestamp = DateTime<Utc>;

/// PlatformName: configured name of a posting platform (e.g. "mastodon")
pub type PlatformName = String;

/// MessageId: identifier a platform returned for an accepted post
pub type MessageId = String;
