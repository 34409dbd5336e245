use std::{
    collections::VecDeque,
    mem,
    time::Instant,
};

use log::{debug, info, warn};

use coffer_shared::{
    ClientMessage, ClientRequestId, ContainerId, ContainerSnapshot, PacketReceiver, PacketSender,
    PlayerRef, ServerMessage,
};

use crate::{
    client_config::ClientConfig,
    error::InventoryClientError,
    events::ClientEvents,
    model::{ClientModel, DeltaApply},
    pending::PendingOperations,
};

/// Client half of the replication boundary.
///
/// Sends inventory requests, mirrors the containers it watches in a
/// [`ClientModel`] and routes acknowledgements to the callback of each
/// request. Requests issued before [`InventoryClient::bind_local`] are queued
/// and flushed once the local player is known.
pub struct InventoryClient {
    config: ClientConfig,
    sender: Box<dyn PacketSender>,
    local: Option<PlayerRef>,
    model: ClientModel,
    pending: PendingOperations,
    deferred: VecDeque<ClientMessage>,
    events: ClientEvents,
}

impl InventoryClient {
    /// Create a new InventoryClient sending through `sender`
    pub fn new(config: ClientConfig, sender: Box<dyn PacketSender>) -> Self {
        let pending = PendingOperations::new(config.operation_timeout);
        Self {
            config,
            sender,
            local: None,
            model: ClientModel::new(),
            pending,
            deferred: VecDeque::new(),
            events: ClientEvents::new(),
        }
    }

    /// Binds the local player and flushes every queued request.
    pub fn bind_local(&mut self, player: PlayerRef) -> Result<(), InventoryClientError> {
        if self.local == Some(player) {
            return Ok(());
        }
        info!("bound local player {:?}", player);
        self.local = Some(player);
        if !self.deferred.is_empty() {
            debug!("flushing {} deferred requests", self.deferred.len());
        }
        while let Some(message) = self.deferred.pop_front() {
            // an unsent request stays pending until it times out
            self.send(&normalize_message(message, player))?;
        }
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.local.is_some()
    }

    pub fn local_player(&self) -> Option<PlayerRef> {
        self.local
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn model(&self) -> &ClientModel {
        &self.model
    }

    pub fn deferred_count(&self) -> usize {
        self.deferred.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drains everything that happened since the last call.
    pub fn take_events(&mut self) -> ClientEvents {
        mem::take(&mut self.events)
    }

    // Containers

    /// Asks the server to start sending a container. Safe to retry: the
    /// server ignores opens of containers it already streams, and an open
    /// still queued for binding is not queued twice. A cached snapshot does
    /// not stop the request, since the server may have ended the watch.
    pub fn open(&mut self, id: &ContainerId) -> Result<(), InventoryClientError> {
        let id = self.normalize(id);
        let message = ClientMessage::OpenContainer { id };
        if self.deferred.contains(&message) {
            return Ok(());
        }
        self.submit(message)
    }

    pub fn open_local_quick(&mut self) -> Result<(), InventoryClientError> {
        let owner = self.local.unwrap_or(PlayerRef::NONE);
        self.open(&ContainerId::player_quick(owner))
    }

    pub fn open_local_main(&mut self) -> Result<(), InventoryClientError> {
        let owner = self.local.unwrap_or(PlayerRef::NONE);
        self.open(&ContainerId::player_main(owner))
    }

    /// Stops watching a container and forgets its cached snapshot.
    pub fn close(&mut self, id: &ContainerId) -> Result<(), InventoryClientError> {
        let id = self.normalize(id);
        self.model.remove(&id);
        self.submit(ClientMessage::CloseContainer { id })
    }

    pub fn is_open(&self, id: &ContainerId) -> bool {
        self.model.contains(&self.normalize(id))
    }

    pub fn snapshot(&self, id: &ContainerId) -> Option<&ContainerSnapshot> {
        self.model.get(&self.normalize(id))
    }

    /// Snapshot of the exact identity, or else of the first cached identity
    /// loosely matching it.
    pub fn snapshot_resolved(&self, partial: &ContainerId) -> Option<&ContainerSnapshot> {
        if let Some(snapshot) = self.snapshot(partial) {
            return Some(snapshot);
        }
        let id = self.model.try_resolve_existing_id(partial)?;
        self.model.get(&id)
    }

    pub fn capacity(&self, id: &ContainerId) -> Option<usize> {
        self.snapshot(id).map(ContainerSnapshot::capacity)
    }

    pub fn local_quick_id(&self) -> Option<ContainerId> {
        self.local.map(ContainerId::player_quick)
    }

    pub fn local_main_id(&self) -> Option<ContainerId> {
        self.local.map(ContainerId::player_main)
    }

    // Requests

    #[allow(clippy::too_many_arguments)]
    pub fn transfer(
        &mut self,
        from: &ContainerId,
        from_index: i32,
        to: &ContainerId,
        to_index: i32,
        amount: i32,
        callback: impl FnOnce(bool, &str) + Send + 'static,
    ) -> Result<ClientRequestId, InventoryClientError> {
        let request_id = self.pending.next_request_id();
        let message = ClientMessage::Transfer {
            from: self.normalize(from),
            from_index,
            to: self.normalize(to),
            to_index,
            amount,
            request_id,
        };
        self.submit_request(request_id, message, Box::new(callback))
    }

    pub fn pickup(
        &mut self,
        item_id: &str,
        amount: u32,
        ammo: u32,
        callback: impl FnOnce(bool, &str) + Send + 'static,
    ) -> Result<ClientRequestId, InventoryClientError> {
        let request_id = self.pending.next_request_id();
        let message = ClientMessage::Pickup {
            item_id: item_id.to_string(),
            amount,
            ammo,
            request_id,
        };
        self.submit_request(request_id, message, Box::new(callback))
    }

    /// Reloads the weapon in `quick_index`. A negative index reloads the
    /// selected quick slot. The callback receives the new ammo count as its
    /// message.
    pub fn reload(
        &mut self,
        quick_index: i32,
        callback: impl FnOnce(bool, &str) + Send + 'static,
    ) -> Result<ClientRequestId, InventoryClientError> {
        let request_id = self.pending.next_request_id();
        let message = ClientMessage::Reload {
            quick_index,
            request_id,
        };
        self.submit_request(request_id, message, Box::new(callback))
    }

    /// Drops `count` units from a slot addressed across the quick bar then
    /// the main inventory.
    pub fn drop_item(
        &mut self,
        global_index: i32,
        count: i32,
        callback: impl FnOnce(bool, &str) + Send + 'static,
    ) -> Result<ClientRequestId, InventoryClientError> {
        let request_id = self.pending.next_request_id();
        let message = ClientMessage::Drop {
            global_index,
            count,
            request_id,
        };
        self.submit_request(request_id, message, Box::new(callback))
    }

    /// A negative index clears the selection.
    pub fn select_quick_slot(&mut self, index: i32) -> Result<(), InventoryClientError> {
        self.submit(ClientMessage::SelectQuickSlot { index })
    }

    pub fn request_full_resync(&mut self) -> Result<(), InventoryClientError> {
        self.submit(ClientMessage::FullResync)
    }

    // Incoming

    pub fn receive_bytes(&mut self, bytes: &[u8]) -> Result<(), InventoryClientError> {
        let message = ServerMessage::from_bytes(bytes).map_err(|error| {
            warn!("malformed packet from the server");
            InventoryClientError::from(error)
        })?;
        self.receive_message(message)
    }

    pub fn receive_message(&mut self, message: ServerMessage) -> Result<(), InventoryClientError> {
        match message {
            ServerMessage::Snapshot(push) => {
                let snapshot = push.into_snapshot()?;
                self.model.apply_snapshot(snapshot);
            }
            ServerMessage::Delta(push) => {
                let delta = push.into_delta()?;
                if self.model.apply_delta(&delta) == DeltaApply::Unknown {
                    self.events.push_unknown_delta(delta.id);
                }
            }
            ServerMessage::Ack(ack) => {
                self.pending.complete(ack.request_id, ack.ok, &ack.message);
            }
        }

        for id in self.model.take_changed() {
            self.events.push_change(id);
        }
        Ok(())
    }

    /// Times out requests still waiting for their acknowledgement.
    pub fn tick(&mut self, now: Instant) {
        for request_id in self.pending.expire(now) {
            self.events.push_timeout(request_id);
        }
    }

    /// Reads every buffered packet from `receiver`. Failures are reported as
    /// [`ErrorEvent`](crate::ErrorEvent)s and do not stop the drain.
    pub fn receive_all(&mut self, receiver: &mut dyn PacketReceiver) {
        loop {
            match receiver.receive() {
                Ok(Some(bytes)) => {
                    if let Err(error) = self.receive_bytes(bytes) {
                        self.events.push_error(error);
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    self.events.push_error(error.into());
                    break;
                }
            }
        }
    }

    // Helpers

    fn normalize(&self, id: &ContainerId) -> ContainerId {
        match self.local {
            Some(local) => id.normalized_for(local),
            None => *id,
        }
    }

    fn submit_request(
        &mut self,
        request_id: ClientRequestId,
        message: ClientMessage,
        callback: Box<dyn FnOnce(bool, &str) + Send>,
    ) -> Result<ClientRequestId, InventoryClientError> {
        self.pending.insert(Instant::now(), request_id, callback);
        if let Err(error) = self.submit(message) {
            self.pending.forget(request_id);
            return Err(error);
        }
        Ok(request_id)
    }

    fn submit(&mut self, message: ClientMessage) -> Result<(), InventoryClientError> {
        if self.local.is_some() {
            return self.send(&message);
        }
        let limit = self.config.max_deferred_requests;
        if self.deferred.len() >= limit {
            warn!("deferred request queue is full, dropping {:?}", message);
            return Err(InventoryClientError::DeferredQueueFull { limit });
        }
        debug!("deferring {:?} until the local player is bound", message);
        self.deferred.push_back(message);
        Ok(())
    }

    fn send(&self, message: &ClientMessage) -> Result<(), InventoryClientError> {
        self.sender.send(&message.to_bytes())?;
        Ok(())
    }
}

fn normalize_message(message: ClientMessage, local: PlayerRef) -> ClientMessage {
    match message {
        ClientMessage::OpenContainer { id } => ClientMessage::OpenContainer {
            id: id.normalized_for(local),
        },
        ClientMessage::CloseContainer { id } => ClientMessage::CloseContainer {
            id: id.normalized_for(local),
        },
        ClientMessage::Transfer {
            from,
            from_index,
            to,
            to_index,
            amount,
            request_id,
        } => ClientMessage::Transfer {
            from: from.normalized_for(local),
            from_index,
            to: to.normalized_for(local),
            to_index,
            amount,
            request_id,
        },
        other => other,
    }
}
