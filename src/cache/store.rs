//! CacheStore: commit and effective-read rules over one slot pair.

use crate::cache::contract::{SlotKey, SlotStorage};
use crate::cache::slot::{Slot, SlotState};
use crate::error::StorageError;
use regex::Regex;
use tracing::{debug, info, warn};

/// Default diff: any byte difference counts as a change.
pub fn content_differs(current: &str, new: &str) -> bool {
    current != new
}

/// View of a single (agent, kind) slot pair.
///
/// `commit_if_changed` is the only mutator of the pair.
pub struct CacheStore<'a> {
    storage: &'a dyn SlotStorage,
    key: SlotKey,
}

impl<'a> CacheStore<'a> {
    pub fn new(storage: &'a dyn SlotStorage, key: SlotKey) -> Self {
        Self { storage, key }
    }

    pub fn key(&self) -> &SlotKey {
        &self.key
    }

    pub fn state(&self) -> Result<SlotState, StorageError> {
        self.storage.state(&self.key)
    }

    /// Accept `new` into Primary when it differs from the current Primary
    /// content under `differs` and does not look like a failure page.
    ///
    /// On acceptance Override is deleted whether or not it existed. Empty
    /// content is never accepted.
    pub fn commit_if_changed<D>(
        &self,
        new: &str,
        differs: D,
        corruption: Option<&Regex>,
    ) -> Result<bool, StorageError>
    where
        D: Fn(&str, &str) -> bool,
    {
        if new.is_empty() {
            debug!(key = %self.key.file_stem(), "Fetched content empty, nothing to commit");
            return Ok(false);
        }

        let previous = self.storage.read(&self.key, Slot::Primary)?;
        if !differs(previous.as_deref().unwrap_or_default(), new) {
            debug!(key = %self.key.file_stem(), "Fetched content unchanged");
            return Ok(false);
        }

        if let Some(pattern) = corruption {
            if pattern.is_match(new) {
                warn!(
                    key = %self.key.file_stem(),
                    pattern = %pattern.as_str(),
                    "Fetched content matches failure signature, keeping previous copy"
                );
                return Ok(false);
            }
        }

        let before = self.storage.state(&self.key)?;
        self.storage.write(&self.key, Slot::Primary, new)?;
        if let Err(e) = self.storage.remove(&self.key, Slot::Override) {
            self.restore_primary(previous.as_deref());
            return Err(e);
        }
        if before.has_override() {
            info!(key = %self.key.file_stem(), "Override cleared by new fetch");
        }
        debug!(key = %self.key.file_stem(), bytes = new.len(), "Committed new content");
        Ok(true)
    }

    /// Undo a Primary write whose commit could not clear Override.
    fn restore_primary(&self, previous: Option<&str>) {
        let restored = match previous {
            Some(content) => self.storage.write(&self.key, Slot::Primary, content),
            None => self.storage.remove(&self.key, Slot::Primary),
        };
        match restored {
            Ok(()) => warn!(key = %self.key.file_stem(), "Override not cleared, commit rolled back"),
            Err(e) => warn!(
                key = %self.key.file_stem(),
                error = %e,
                "Override not cleared and previous content could not be restored"
            ),
        }
    }

    /// Override if present, else Primary, else `None`.
    pub fn read_effective(&self, warn_if_missing: bool) -> Result<Option<String>, StorageError> {
        let content = match self.state()?.read_source() {
            Some(slot) => {
                if slot == Slot::Override {
                    debug!(key = %self.key.file_stem(), "Reading operator override");
                }
                self.storage.read(&self.key, slot)?
            }
            None => None,
        };
        if content.is_none() && warn_if_missing {
            warn!(key = %self.key.file_stem(), "No downloaded content for {}", self.key.agent);
        }
        Ok(content)
    }
}
