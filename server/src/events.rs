use std::{mem, vec::IntoIter};

use coffer_shared::{ContainerId, ObjectRef, PlayerRef, Slot};

use crate::error::InventoryServerError;

/// Items a pickup could not place. Dropping them in the world is up to the
/// caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overflow {
    pub player: PlayerRef,
    pub item_id: String,
    pub amount: u32,
    pub ammo: u32,
}

/// Items a player dropped out of their inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dropped {
    pub player: PlayerRef,
    pub slot: Slot,
}

pub struct ServerEvents {
    overflows: Vec<Overflow>,
    drops: Vec<Dropped>,
    corpse_despawns: Vec<ObjectRef>,
    expired_opens: Vec<(ContainerId, PlayerRef)>,
    errors: Vec<InventoryServerError>,
    empty: bool,
}

impl Default for ServerEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerEvents {
    pub(crate) fn new() -> Self {
        Self {
            overflows: Vec::new(),
            drops: Vec::new(),
            corpse_despawns: Vec::new(),
            expired_opens: Vec::new(),
            errors: Vec::new(),
            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: ServerEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: ServerEvent>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_overflow(&mut self, overflow: Overflow) {
        self.overflows.push(overflow);
        self.empty = false;
    }

    pub(crate) fn push_drop(&mut self, dropped: Dropped) {
        self.drops.push(dropped);
        self.empty = false;
    }

    pub(crate) fn push_corpse_despawn(&mut self, object: ObjectRef) {
        self.corpse_despawns.push(object);
        self.empty = false;
    }

    pub(crate) fn push_expired_open(&mut self, id: ContainerId, viewer: PlayerRef) {
        self.expired_opens.push((id, viewer));
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: InventoryServerError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait ServerEvent {
    type Iter;

    fn iter(events: &mut ServerEvents) -> Self::Iter;

    fn has(events: &ServerEvents) -> bool;
}

// OverflowEvent
pub struct OverflowEvent;
impl ServerEvent for OverflowEvent {
    type Iter = IntoIter<Overflow>;

    fn iter(events: &mut ServerEvents) -> Self::Iter {
        mem::take(&mut events.overflows).into_iter()
    }

    fn has(events: &ServerEvents) -> bool {
        !events.overflows.is_empty()
    }
}

// DroppedEvent
pub struct DroppedEvent;
impl ServerEvent for DroppedEvent {
    type Iter = IntoIter<Dropped>;

    fn iter(events: &mut ServerEvents) -> Self::Iter {
        mem::take(&mut events.drops).into_iter()
    }

    fn has(events: &ServerEvents) -> bool {
        !events.drops.is_empty()
    }
}

// CorpseDespawnedEvent
pub struct CorpseDespawnedEvent;
impl ServerEvent for CorpseDespawnedEvent {
    type Iter = IntoIter<ObjectRef>;

    fn iter(events: &mut ServerEvents) -> Self::Iter {
        mem::take(&mut events.corpse_despawns).into_iter()
    }

    fn has(events: &ServerEvents) -> bool {
        !events.corpse_despawns.is_empty()
    }
}

// OpenExpiredEvent
pub struct OpenExpiredEvent;
impl ServerEvent for OpenExpiredEvent {
    type Iter = IntoIter<(ContainerId, PlayerRef)>;

    fn iter(events: &mut ServerEvents) -> Self::Iter {
        mem::take(&mut events.expired_opens).into_iter()
    }

    fn has(events: &ServerEvents) -> bool {
        !events.expired_opens.is_empty()
    }
}

// ErrorEvent
pub struct ErrorEvent;
impl ServerEvent for ErrorEvent {
    type Iter = IntoIter<InventoryServerError>;

    fn iter(events: &mut ServerEvents) -> Self::Iter {
        mem::take(&mut events.errors).into_iter()
    }

    fn has(events: &ServerEvents) -> bool {
        !events.errors.is_empty()
    }
}
