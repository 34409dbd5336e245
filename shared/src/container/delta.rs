use log::trace;

use crate::{ContainerId, ContainerVersion, Slot};

/// New contents of a single slot index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotChange {
    pub index: usize,
    pub slot: Slot,
}

impl SlotChange {
    pub fn new(index: usize, slot: Slot) -> Self {
        Self { index, slot }
    }
}

/// The changes that advance a replica of `id` from `from_version` to
/// `to_version`. Changes are applied in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerDelta {
    pub id: ContainerId,
    pub from_version: ContainerVersion,
    pub to_version: ContainerVersion,
    pub changes: Vec<SlotChange>,
}

impl ContainerDelta {
    pub fn new(id: ContainerId, from_version: ContainerVersion) -> Self {
        Self {
            id,
            from_version,
            to_version: from_version,
            changes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn push(&mut self, change: SlotChange, to_version: ContainerVersion) {
        self.changes.push(change);
        self.to_version = to_version;
    }

    /// Appends every change of a later delta on the same container.
    pub fn extend(&mut self, later: ContainerDelta) {
        if later.is_empty() {
            return;
        }
        self.changes.extend(later.changes);
        self.to_version = later.to_version;
    }

    /// Final state of `index` in this delta, if it is touched.
    pub fn change_at(&self, index: usize) -> Option<&Slot> {
        self.changes
            .iter()
            .rev()
            .find(|change| change.index == index)
            .map(|change| &change.slot)
    }
}

/// Full copy of a container at `version`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerSnapshot {
    pub id: ContainerId,
    pub version: ContainerVersion,
    pub slots: Vec<Slot>,
}

impl ContainerSnapshot {
    pub fn new(id: ContainerId, version: ContainerVersion, slots: Vec<Slot>) -> Self {
        Self { id, version, slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Applies `delta` if it is newer than this snapshot. Returns false, and
    /// leaves the snapshot untouched, for stale or duplicate deltas.
    pub fn apply(&mut self, delta: &ContainerDelta) -> bool {
        if delta.to_version <= self.version {
            trace!(
                "ignoring delta {}..{} for {}, already at {}",
                delta.from_version,
                delta.to_version,
                self.id,
                self.version
            );
            return false;
        }
        for change in &delta.changes {
            // out of range indices are skipped, the rest of the delta still applies
            if let Some(slot) = self.slots.get_mut(change.index) {
                *slot = change.slot.clone();
            }
        }
        self.version = delta.to_version;
        true
    }

    pub fn non_empty_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }
}
