use crate::cache::contract::{SlotKey, SlotStorage};
use crate::cache::slot::{Slot, SlotState};
use crate::error::StorageError;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-process slot storage for tests.
#[derive(Default)]
pub struct MemorySlotStorage {
    slots: RefCell<BTreeMap<(SlotKey, Slot), String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, key: &SlotKey, slot: Slot) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(&(key.clone(), slot)).cloned())
    }

    fn write(&self, key: &SlotKey, slot: Slot, content: &str) -> Result<(), StorageError> {
        key.validate()?;
        self.slots
            .borrow_mut()
            .insert((key.clone(), slot), content.to_string());
        Ok(())
    }

    fn remove(&self, key: &SlotKey, slot: Slot) -> Result<(), StorageError> {
        self.slots.borrow_mut().remove(&(key.clone(), slot));
        Ok(())
    }

    fn state(&self, key: &SlotKey) -> Result<SlotState, StorageError> {
        let slots = self.slots.borrow();
        Ok(SlotState::from_presence(
            slots.contains_key(&(key.clone(), Slot::Primary)),
            slots.contains_key(&(key.clone(), Slot::Override)),
        ))
    }
}
