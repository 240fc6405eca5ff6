use crate::cache::contract::{SlotKey, SlotStorage};
use crate::cache::slot::{Slot, SlotState};
use crate::error::StorageError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const OVERRIDE_SUFFIX: &str = "-override";

/// Slot pairs stored as plain files under one data directory.
///
/// Primary lives at `<dir>/<agent>-<kind>` and Override at
/// `<dir>/<agent>-<kind>-override`, so operators can drop an override in by hand.
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &SlotKey, slot: Slot) -> Result<PathBuf, StorageError> {
        key.validate()?;
        let name = match slot {
            Slot::Primary => key.file_stem(),
            Slot::Override => format!("{}{}", key.file_stem(), OVERRIDE_SUFFIX),
        };
        Ok(self.dir.join(name))
    }
}

impl SlotStorage for FileSlotStorage {
    fn read(&self, key: &SlotKey, slot: Slot) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key, slot)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn write(&self, key: &SlotKey, slot: Slot, content: &str) -> Result<(), StorageError> {
        let path = self.path_for(key, slot)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        // Readers never see a half-written slot.
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, content).map_err(|e| StorageError::io(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))
    }

    fn remove(&self, key: &SlotKey, slot: Slot) -> Result<(), StorageError> {
        let path = self.path_for(key, slot)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn state(&self, key: &SlotKey) -> Result<SlotState, StorageError> {
        let primary = self.path_for(key, Slot::Primary)?.is_file();
        let override_present = self.path_for(key, Slot::Override)?.is_file();
        Ok(SlotState::from_presence(primary, override_present))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn slot_paths_follow_agent_kind_naming() {
        let storage = FileSlotStorage::new("/var/lib/schedbot");
        let key = SlotKey::new("tweenies", "schedule");
        assert_eq!(
            storage.path_for(&key, Slot::Primary).unwrap(),
            PathBuf::from("/var/lib/schedbot/tweenies-schedule")
        );
        assert_eq!(
            storage.path_for(&key, Slot::Override).unwrap(),
            PathBuf::from("/var/lib/schedbot/tweenies-schedule-override")
        );
    }

    #[test]
    fn rejects_keys_that_escape_the_data_dir() {
        let storage = FileSlotStorage::new("/var/lib/schedbot");
        let key = SlotKey::new("../etc", "passwd");
        assert!(storage.path_for(&key, Slot::Primary).is_err());
    }

    #[test]
    fn missing_slots_read_as_none_and_remove_is_quiet() {
        let temp = TempDir::new().unwrap();
        let storage = FileSlotStorage::new(temp.path().join("data"));
        let key = SlotKey::new("abovebrum", "iss");

        assert_eq!(storage.read(&key, Slot::Primary).unwrap(), None);
        storage.remove(&key, Slot::Override).unwrap();
        assert_eq!(storage.state(&key).unwrap(), SlotState::Empty);
    }

    #[test]
    fn write_creates_directory_and_reports_state() {
        let temp = TempDir::new().unwrap();
        let storage = FileSlotStorage::new(temp.path().join("nested").join("data"));
        let key = SlotKey::new("abovebrum", "iss");

        storage.write(&key, Slot::Primary, "row\n").unwrap();
        assert_eq!(storage.read(&key, Slot::Primary).unwrap().as_deref(), Some("row\n"));
        assert_eq!(storage.state(&key).unwrap(), SlotState::Primary);

        std::fs::write(storage.path_for(&key, Slot::Override).unwrap(), "manual").unwrap();
        assert_eq!(storage.state(&key).unwrap(), SlotState::Both);
    }
}
