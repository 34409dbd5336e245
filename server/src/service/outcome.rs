use coffer_shared::{ContainerDelta, ContainerId, InventoryError, Slot};

/// Result of a committed transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferOutcome {
    /// One delta when both slots live in the same container, two otherwise.
    pub deltas: Vec<ContainerDelta>,
    /// Whether the two slots exchanged their whole contents.
    pub swapped: bool,
}

/// Result of adding items to a player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Units that did not fit anywhere. Handling them is up to the caller.
    pub leftover: u32,
    pub deltas: Vec<ContainerDelta>,
}

impl AddOutcome {
    pub fn is_complete(&self) -> bool {
        self.leftover == 0
    }

    /// `NotEnoughSpace` when some units were left over.
    pub fn reason(&self) -> Option<InventoryError> {
        if self.is_complete() {
            None
        } else {
            Some(InventoryError::NotEnoughSpace)
        }
    }
}

/// Result of a reload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReloadOutcome {
    pub new_ammo: u32,
    /// Ammo source deltas first, the weapon slot delta last. Empty when the
    /// magazine was already full.
    pub deltas: Vec<ContainerDelta>,
}

/// Result of removing units from one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// What was taken out, with its item state.
    pub removed: Slot,
    pub delta: ContainerDelta,
}

/// Player contents moved into a new corpse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorpseContents {
    pub slots: Vec<Slot>,
    /// Clearing deltas of the player containers.
    pub deltas: Vec<ContainerDelta>,
}

/// Container and slot addressed by a global slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotAddress {
    pub id: ContainerId,
    pub index: usize,
}
