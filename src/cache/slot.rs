//! Slot pair state machine.

/// One of the two slots kept per cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Primary,
    Override,
}

/// Which slots of a pair currently hold content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Primary,
    Override,
    Both,
}

impl SlotState {
    pub fn from_presence(primary: bool, override_present: bool) -> Self {
        match (primary, override_present) {
            (false, false) => SlotState::Empty,
            (true, false) => SlotState::Primary,
            (false, true) => SlotState::Override,
            (true, true) => SlotState::Both,
        }
    }

    pub fn has_primary(self) -> bool {
        matches!(self, SlotState::Primary | SlotState::Both)
    }

    pub fn has_override(self) -> bool {
        matches!(self, SlotState::Override | SlotState::Both)
    }

    /// Slot an effective read is served from, if any.
    pub fn read_source(self) -> Option<Slot> {
        match self {
            SlotState::Empty => None,
            SlotState::Primary => Some(Slot::Primary),
            SlotState::Override | SlotState::Both => Some(Slot::Override),
        }
    }
}
