//! Alert windows: when, relative to an event, an agent should post.

use crate::event::{AlertEvent, EventList};
use crate::types::Timestamp;
use chrono::Duration;

/// Half-open interval `[time + opens, time + closes)` around an event time.
///
/// Agents build their `in_window` predicate from one of these; the pipeline
/// itself assumes nothing about window shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertWindow {
    pub opens: Duration,
    pub closes: Duration,
}

impl AlertWindow {
    pub fn new(opens: Duration, closes: Duration) -> Self {
        Self { opens, closes }
    }

    /// Open for `lead` before the event, closing as it starts.
    pub fn before(lead: Duration) -> Self {
        Self::new(-lead, Duration::zero())
    }

    /// Open from the event time for `span`.
    pub fn after(span: Duration) -> Self {
        Self::new(Duration::zero(), span)
    }

    pub fn contains(&self, event_time: Timestamp, now: Timestamp) -> bool {
        now >= event_time + self.opens && now < event_time + self.closes
    }
}

/// Keep exactly the events the predicate accepts, preserving order.
pub fn select<F>(events: EventList, now: Timestamp, in_window: F) -> EventList
where
    F: Fn(&dyn AlertEvent, Timestamp) -> bool,
{
    events
        .into_iter()
        .filter(|event| in_window(event.as_ref(), now))
        .collect()
}
