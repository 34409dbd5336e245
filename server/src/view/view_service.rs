use std::mem;

use log::{debug, trace};

use coffer_shared::{
    AckMessage, ContainerDelta, ContainerId, ContainerSnapshot, PlayerRef, ServerMessage,
};

use crate::{error::InventoryServerError, user::SessionRegistry, view::WatcherIndex};

/// Routes snapshots and deltas to the players watching a container, or to
/// one explicit player.
///
/// Sending to a player that stopped watching, or disconnected, is a no-op.
/// Transport failures are collected and drained with [`ViewService::take_errors`].
#[derive(Default)]
pub struct ViewService {
    watchers: WatcherIndex,
    sessions: SessionRegistry,
    errors: Vec<InventoryServerError>,
}

impl ViewService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionRegistry {
        &mut self.sessions
    }

    // Watchers

    pub fn add_viewer(&mut self, id: ContainerId, viewer: PlayerRef) -> bool {
        self.watchers.insert(id, viewer)
    }

    pub fn remove_viewer(&mut self, id: &ContainerId, viewer: &PlayerRef) -> bool {
        self.watchers.remove(id, viewer)
    }

    pub fn remove_all_for_viewer(&mut self, viewer: &PlayerRef) -> Vec<ContainerId> {
        self.watchers.remove_viewer(viewer)
    }

    pub fn remove_container(&mut self, id: &ContainerId) -> Vec<PlayerRef> {
        self.watchers.remove_container(id)
    }

    pub fn is_watching(&self, id: &ContainerId, viewer: &PlayerRef) -> bool {
        self.watchers.contains(id, viewer)
    }

    pub fn watchers(&self, id: &ContainerId) -> Vec<PlayerRef> {
        self.watchers.watchers(id)
    }

    pub fn watched_by(&self, viewer: &PlayerRef) -> Vec<ContainerId> {
        self.watchers.watched_by(viewer)
    }

    // Fan-out

    /// Returns how many watchers the snapshot was sent to.
    pub fn broadcast_snapshot(&mut self, snapshot: &ContainerSnapshot) -> usize {
        let payload = ServerMessage::snapshot(snapshot).to_bytes();
        self.send_to_watchers(&snapshot.id, &payload)
    }

    /// Returns how many watchers the delta was sent to.
    pub fn broadcast_delta(&mut self, delta: &ContainerDelta) -> usize {
        if delta.is_empty() {
            return 0;
        }
        let payload = ServerMessage::delta(delta).to_bytes();
        let sent = self.send_to_watchers(&delta.id, &payload);
        debug!(
            "delta {}..{} of {} sent to {} watchers",
            delta.from_version, delta.to_version, delta.id, sent
        );
        sent
    }

    pub fn send_snapshot_to(&mut self, viewer: &PlayerRef, snapshot: &ContainerSnapshot) {
        let payload = ServerMessage::snapshot(snapshot).to_bytes();
        self.send(viewer, &payload);
    }

    pub fn send_delta_to(&mut self, viewer: &PlayerRef, delta: &ContainerDelta) {
        let payload = ServerMessage::delta(delta).to_bytes();
        self.send(viewer, &payload);
    }

    pub fn send_ack(&mut self, player: &PlayerRef, ack: AckMessage) {
        trace!(
            "ack {} to {:?}: ok {} {:?}",
            ack.request_id,
            player,
            ack.ok,
            ack.message
        );
        let payload = ServerMessage::Ack(ack).to_bytes();
        self.send(player, &payload);
    }

    pub fn take_errors(&mut self) -> Vec<InventoryServerError> {
        mem::take(&mut self.errors)
    }

    fn send_to_watchers(&mut self, id: &ContainerId, payload: &[u8]) -> usize {
        let mut sent = 0;
        for viewer in self.watchers.watchers(id) {
            if self.send(&viewer, payload) {
                sent += 1;
            }
        }
        sent
    }

    fn send(&mut self, player: &PlayerRef, payload: &[u8]) -> bool {
        if !self.sessions.contains(player) {
            return false;
        }
        match self.sessions.send(player, payload) {
            Ok(()) => true,
            Err(error) => {
                self.errors.push(error);
                false
            }
        }
    }
}
