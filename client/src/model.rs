use std::collections::BTreeMap;

use log::{debug, trace};

use coffer_shared::{ContainerDelta, ContainerId, ContainerSnapshot};

/// Result of handing a delta to the [`ClientModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeltaApply {
    /// The delta advanced the cached snapshot.
    Applied,
    /// The cached snapshot is already at or past the delta's version.
    Stale,
    /// No snapshot is cached for the delta's container.
    Unknown,
}

/// Last known snapshot of every container this client watches.
///
/// Deltas are gated on their target version, so duplicate or late
/// redelivery leaves the cache untouched.
#[derive(Default)]
pub struct ClientModel {
    snapshots: BTreeMap<ContainerId, ContainerSnapshot>,
    changed: Vec<ContainerId>,
}

impl ClientModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached snapshot of the container.
    pub fn apply_snapshot(&mut self, snapshot: ContainerSnapshot) {
        debug!(
            "snapshot of {} at version {} ({} slots)",
            snapshot.id,
            snapshot.version,
            snapshot.capacity()
        );
        let id = snapshot.id;
        self.snapshots.insert(id, snapshot);
        self.mark_changed(id);
    }

    pub fn apply_delta(&mut self, delta: &ContainerDelta) -> DeltaApply {
        let Some(snapshot) = self.snapshots.get_mut(&delta.id) else {
            trace!("delta for {} with no cached snapshot", delta.id);
            return DeltaApply::Unknown;
        };
        if !snapshot.apply(delta) {
            return DeltaApply::Stale;
        }
        self.mark_changed(delta.id);
        DeltaApply::Applied
    }

    pub fn get(&self, id: &ContainerId) -> Option<&ContainerSnapshot> {
        self.snapshots.get(id)
    }

    pub fn contains(&self, id: &ContainerId) -> bool {
        self.snapshots.contains_key(id)
    }

    pub fn remove(&mut self, id: &ContainerId) -> Option<ContainerSnapshot> {
        self.snapshots.remove(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ContainerId> {
        self.snapshots.keys()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// First cached identity of the same kind that shares the object ref or the
    /// owner of `partial`, skipping whichever of the two it leaves unset.
    pub fn try_resolve_existing_id(&self, partial: &ContainerId) -> Option<ContainerId> {
        self.snapshots
            .keys()
            .find(|id| id.loosely_matches(partial))
            .copied()
    }

    /// Containers changed since the last call, in the order they first
    /// changed.
    pub fn take_changed(&mut self) -> Vec<ContainerId> {
        std::mem::take(&mut self.changed)
    }

    fn mark_changed(&mut self, id: ContainerId) {
        if !self.changed.contains(&id) {
            self.changed.push(id);
        }
    }
}
