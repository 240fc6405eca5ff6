//! Content cache: a Primary/Override slot pair per (agent, resource kind).
//!
//! Primary holds the last accepted fetch. Override is an operator-supplied file
//! that wins on read until the next successful commit deletes it.

pub mod contract;
pub mod fs;
pub mod memory;
pub mod slot;
pub mod store;

pub use contract::{SlotKey, SlotStorage};
pub use fs::FileSlotStorage;
pub use memory::MemorySlotStorage;
pub use slot::{Slot, SlotState};
pub use store::{content_differs, CacheStore};
