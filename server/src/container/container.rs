use log::warn;

use coffer_shared::{
    ContainerDelta, ContainerId, ContainerKind, ContainerSnapshot, ContainerVersion, ObjectRef,
    PlayerRef, Slot, SlotChange,
};

use crate::container::policy::{ContainerPolicy, OpenAccess, OwnerOnly};

/// Authoritative slot array of one container.
///
/// Every committed slot write bumps the version by exactly one and is
/// recorded in the caller's delta, so a replica that applies the delta lands
/// on the same version.
pub struct Container {
    id: ContainerId,
    version: ContainerVersion,
    slots: Vec<Slot>,
    policy: Box<dyn ContainerPolicy>,
}

impl Container {
    pub fn new<P: ContainerPolicy + 'static>(id: ContainerId, capacity: usize, policy: P) -> Self {
        Self {
            id,
            version: 0,
            slots: vec![Slot::empty(); capacity],
            policy: Box::new(policy),
        }
    }

    pub fn player_quick(owner: PlayerRef, capacity: usize) -> Self {
        Self::new(ContainerId::player_quick(owner), capacity, OwnerOnly)
    }

    pub fn player_main(owner: PlayerRef, capacity: usize) -> Self {
        Self::new(ContainerId::player_main(owner), capacity, OwnerOnly)
    }

    pub fn chest(object: ObjectRef, capacity: usize) -> Self {
        Self::new(
            ContainerId::of_object(ContainerKind::Chest, object),
            capacity,
            OpenAccess,
        )
    }

    /// A corpse pre-filled with `slots`, sized to fit them exactly.
    pub fn corpse(object: ObjectRef, slots: Vec<Slot>) -> Self {
        Self {
            id: ContainerId::of_object(ContainerKind::Corpse, object),
            version: 0,
            slots,
            policy: Box::new(OpenAccess),
        }
    }

    /// Initial contents, written before registration. Does not bump the
    /// version.
    pub fn with_slot(mut self, index: usize, slot: Slot) -> Self {
        if let Some(target) = self.slots.get_mut(index) {
            *target = slot;
        }
        self
    }

    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    pub fn version(&self) -> ContainerVersion {
        self.version
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at `index`, or `None` when out of range.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn non_empty_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    pub fn snapshot(&self) -> ContainerSnapshot {
        ContainerSnapshot::new(self.id, self.version, self.slots.clone())
    }

    pub fn can_player_access(&self, player: PlayerRef) -> bool {
        self.policy.can_player_access(&self.id, player)
    }

    pub fn can_accept(&self, index: usize, incoming: &Slot) -> bool {
        self.policy.can_accept(index, incoming)
    }

    /// Starts an empty delta from the current version.
    pub(crate) fn begin_delta(&self) -> ContainerDelta {
        ContainerDelta::new(self.id, self.version)
    }

    /// Writes `slot` at `index`, bumps the version and records the change.
    /// Callers bounds-check first, an out of range write is dropped.
    pub(crate) fn commit(&mut self, index: usize, slot: Slot, delta: &mut ContainerDelta) {
        let Some(target) = self.slots.get_mut(index) else {
            warn!("dropping write to slot {} of {}, out of range", index, self.id);
            return;
        };
        *target = slot.clone();
        self.version += 1;
        delta.push(SlotChange::new(index, slot), self.version);
    }
}
