//! Post rendering: length-aware segmentation and per-platform reply threading.

pub mod chain;
pub mod renderer;
pub mod wrap;

pub use chain::ReplyChain;
pub use renderer::{dispatches, plan, Dispatch, PlatformSegments, PostRenderer};
pub use wrap::{segment_status, wrap_words, CONTINUATION_RESERVE, ELLIPSIS, IMAGE_RESERVATION};
