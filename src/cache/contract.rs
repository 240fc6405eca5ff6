use crate::cache::slot::{Slot, SlotState};
use crate::error::StorageError;

/// Cache key: one slot pair per agent and resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub agent: String,
    pub kind: String,
}

impl SlotKey {
    pub fn new(agent: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            kind: kind.into(),
        }
    }

    /// Base file name of the Primary slot, e.g. `tweenies-schedule`.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.agent, self.kind)
    }

    pub fn validate(&self) -> Result<(), StorageError> {
        for part in [&self.agent, &self.kind] {
            if part.is_empty()
                || part.contains(['/', '\\'])
                || part == "."
                || part == ".."
            {
                return Err(StorageError::InvalidKey(self.file_stem()));
            }
        }
        Ok(())
    }
}

/// Raw slot persistence. Missing slots read as `None`; removing a missing slot is not an error.
pub trait SlotStorage {
    fn read(&self, key: &SlotKey, slot: Slot) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &SlotKey, slot: Slot, content: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &SlotKey, slot: Slot) -> Result<(), StorageError>;
    fn state(&self, key: &SlotKey) -> Result<SlotState, StorageError>;
}
