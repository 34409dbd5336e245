use std::{mem, vec::IntoIter};

use coffer_shared::{ClientRequestId, ContainerId};

use crate::error::InventoryClientError;

pub struct ClientEvents {
    changes: Vec<ContainerId>,
    unknown_deltas: Vec<ContainerId>,
    timeouts: Vec<ClientRequestId>,
    errors: Vec<InventoryClientError>,
    empty: bool,
}

impl Default for ClientEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientEvents {
    pub(crate) fn new() -> Self {
        Self {
            changes: Vec::new(),
            unknown_deltas: Vec::new(),
            timeouts: Vec::new(),
            errors: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: ClientEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: ClientEvent>(&self) -> bool {
        V::has(self)
    }

    pub(crate) fn push_change(&mut self, id: ContainerId) {
        self.changes.push(id);
        self.empty = false;
    }

    pub(crate) fn push_unknown_delta(&mut self, id: ContainerId) {
        if !self.unknown_deltas.contains(&id) {
            self.unknown_deltas.push(id);
        }
        self.empty = false;
    }

    pub(crate) fn push_timeout(&mut self, request_id: ClientRequestId) {
        self.timeouts.push(request_id);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: InventoryClientError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait ClientEvent {
    type Iter;

    fn iter(events: &mut ClientEvents) -> Self::Iter;

    fn has(events: &ClientEvents) -> bool;
}

// ContainerChangedEvent
pub struct ContainerChangedEvent;
impl ClientEvent for ContainerChangedEvent {
    type Iter = IntoIter<ContainerId>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        mem::take(&mut events.changes).into_iter()
    }

    fn has(events: &ClientEvents) -> bool {
        !events.changes.is_empty()
    }
}

// UnknownDeltaEvent
/// A delta arrived for a container with no cached snapshot. Reopening the
/// container, or a full resync, recovers.
pub struct UnknownDeltaEvent;
impl ClientEvent for UnknownDeltaEvent {
    type Iter = IntoIter<ContainerId>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        mem::take(&mut events.unknown_deltas).into_iter()
    }

    fn has(events: &ClientEvents) -> bool {
        !events.unknown_deltas.is_empty()
    }
}

// RequestTimeoutEvent
pub struct RequestTimeoutEvent;
impl ClientEvent for RequestTimeoutEvent {
    type Iter = IntoIter<ClientRequestId>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        mem::take(&mut events.timeouts).into_iter()
    }

    fn has(events: &ClientEvents) -> bool {
        !events.timeouts.is_empty()
    }
}

// ErrorEvent
pub struct ErrorEvent;
impl ClientEvent for ErrorEvent {
    type Iter = IntoIter<InventoryClientError>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        mem::take(&mut events.errors).into_iter()
    }

    fn has(events: &ClientEvents) -> bool {
        !events.errors.is_empty()
    }
}
