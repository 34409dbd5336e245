use std::{mem, sync::Arc, time::Instant};

use log::{debug, info, warn};

use coffer_shared::{
    AckMessage, ClientMessage, ClientRequestId, ContainerDelta, ContainerId, ContainerKind,
    ContainerSnapshot, InventoryError, ItemCatalog, ObjectRef, PacketReceiver, PacketSender,
    PlayerRef,
};

use crate::{
    container::{Container, ContainerRegistry},
    error::InventoryServerError,
    events::{Dropped, Overflow, ServerEvents},
    server::{closed_watches::ClosedWatches, OpenState, ServerConfig, ViewerScopeMut},
    service::{AddOutcome, ContainerService},
    view::ViewService,
    waitlist::OpenWaitlist,
};

/// Server half of the replication boundary.
///
/// Decodes client requests, runs them through the [`ContainerService`],
/// pushes the resulting deltas to every watcher and acknowledges the
/// caller. Without a bound service every acknowledged request is refused
/// with `no_server`.
pub struct InventoryServer {
    config: ServerConfig,
    registry: ContainerRegistry,
    service: Option<ContainerService>,
    view: ViewService,
    waitlist: OpenWaitlist,
    closed: ClosedWatches,
    events: ServerEvents,
}

impl InventoryServer {
    /// Create a new InventoryServer with no service bound
    pub fn new(config: ServerConfig) -> Self {
        let waitlist = OpenWaitlist::new(config.pending_open_ttl);
        let closed = ClosedWatches::new(config.closed_watch_history);
        Self {
            config,
            registry: ContainerRegistry::new(),
            service: None,
            view: ViewService::new(),
            waitlist,
            closed,
            events: ServerEvents::new(),
        }
    }

    /// Create a new InventoryServer with a service over `catalog`
    pub fn with_catalog(config: ServerConfig, catalog: Arc<dyn ItemCatalog>) -> Self {
        let mut server = Self::new(config);
        server.bind_service(catalog);
        server
    }

    pub fn bind_service(&mut self, catalog: Arc<dyn ItemCatalog>) {
        info!("inventory service bound");
        self.service = Some(ContainerService::new(
            catalog,
            self.config.default_magazine_size,
        ));
    }

    pub fn unbind_service(&mut self) -> Option<ContainerService> {
        info!("inventory service unbound");
        self.service.take()
    }

    pub fn has_service(&self) -> bool {
        self.service.is_some()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    pub fn container(&self, id: &ContainerId) -> Option<&Container> {
        self.registry.get(id)
    }

    pub fn view(&self) -> &ViewService {
        &self.view
    }

    /// Drains everything that happened since the last call.
    pub fn take_events(&mut self) -> ServerEvents {
        self.drain_view_errors();
        mem::take(&mut self.events)
    }

    // Players

    pub fn connect_player(
        &mut self,
        player: PlayerRef,
        sender: Box<dyn PacketSender>,
    ) -> Result<(), InventoryServerError> {
        self.view.sessions_mut().insert(player, sender)?;
        info!("player {:?} connected", player);
        Ok(())
    }

    /// Tears down every watch and pending open of `player`.
    pub fn disconnect_player(&mut self, player: &PlayerRef) {
        let watched = self.view.remove_all_for_viewer(player);
        self.waitlist.remove_viewer(player);
        self.view.sessions_mut().remove(player);
        self.closed.remove_viewer(player);
        info!(
            "player {:?} disconnected, released {} watches",
            player,
            watched.len()
        );
    }

    /// Registers the quick bar and main inventory of `player`.
    pub fn spawn_player(&mut self, player: PlayerRef) -> Result<(), InventoryServerError> {
        self.register_container(Container::player_quick(player, self.config.quick_slots))?;
        self.register_container(Container::player_main(player, self.config.main_slots))?;
        Ok(())
    }

    pub fn despawn_player(&mut self, player: PlayerRef) {
        self.unregister_container(&ContainerId::player_quick(player));
        self.unregister_container(&ContainerId::player_main(player));
    }

    pub fn viewer_scope_mut(&mut self, viewer: PlayerRef) -> ViewerScopeMut<'_> {
        ViewerScopeMut::new(self, viewer)
    }

    // Containers

    /// Registers `container` and delivers every open that was waiting on it.
    pub fn register_container(&mut self, container: Container) -> Result<(), InventoryServerError> {
        let id = *container.id();
        self.registry.register(container)?;

        for viewer in self.waitlist.take(&id) {
            if !self.view.sessions().contains(&viewer) {
                continue;
            }
            let Some(container) = self.registry.get(&id) else {
                break;
            };
            if !container.can_player_access(viewer) {
                warn!("dropping queued open of {} by {:?}, access denied", id, viewer);
                continue;
            }
            let snapshot = container.snapshot();
            info!("delivering queued open of {} to {:?}", id, viewer);
            self.grant(viewer, snapshot);
        }
        self.drain_view_errors();
        Ok(())
    }

    /// Unregisters `id`, closing it for every watcher and purging the opens
    /// still waiting on it.
    pub fn unregister_container(&mut self, id: &ContainerId) -> Option<Container> {
        let purged = self.waitlist.take(id);
        if !purged.is_empty() {
            debug!("purged {} pending opens of {}", purged.len(), id);
        }
        for viewer in self.view.remove_container(id) {
            self.closed.insert(viewer, *id);
        }
        self.registry.unregister(id)
    }

    pub fn spawn_chest(&mut self, object: ObjectRef) -> Result<ContainerId, InventoryServerError> {
        let container = Container::chest(object, self.config.chest_slots);
        let id = *container.id();
        self.register_container(container)?;
        Ok(id)
    }

    /// Moves everything `owner` carries into a new corpse container for
    /// `object`. Returns `None`, and registers nothing, when the player
    /// carried nothing.
    pub fn spawn_corpse_from_player(
        &mut self,
        owner: PlayerRef,
        object: ObjectRef,
    ) -> Result<Option<ContainerId>, InventoryServerError> {
        let Some(service) = &self.service else {
            return Err(InventoryError::NoServer.into());
        };
        let contents = service.take_corpse_contents(&mut self.registry, owner)?;
        self.publish(&contents.deltas);

        if contents.slots.is_empty() {
            debug!("{:?} carried nothing, no corpse spawned", owner);
            return Ok(None);
        }
        let corpse = Container::corpse(object, contents.slots);
        let id = *corpse.id();
        self.register_container(corpse)?;
        Ok(Some(id))
    }

    /// Sends a fresh snapshot of `id` to every watcher. Returns how many
    /// watchers received it.
    pub fn resync_container(&mut self, id: &ContainerId) -> usize {
        let Some(container) = self.registry.get(id) else {
            return 0;
        };
        let snapshot = container.snapshot();
        let sent = self.view.broadcast_snapshot(&snapshot);
        self.drain_view_errors();
        sent
    }

    /// State of the open lifecycle of `id` for `viewer`.
    pub fn open_state(&self, viewer: &PlayerRef, id: &ContainerId) -> OpenState {
        let id = id.normalized_for(*viewer);
        if self.view.is_watching(&id, viewer) {
            OpenState::Open
        } else if self.waitlist.is_pending(&id, viewer) {
            OpenState::PendingOpen
        } else if self.closed.contains(*viewer, id) {
            OpenState::Closed
        } else {
            OpenState::Unopened
        }
    }

    // Server-side operations

    /// Gives `player` items outside of any client request, e.g. loot.
    pub fn add_item_to_player(
        &mut self,
        player: PlayerRef,
        item_id: &str,
        amount: u32,
        ammo: u32,
    ) -> Result<AddOutcome, InventoryError> {
        let selected = self.view.sessions().selected_quick(&player);
        let service = self.service.as_ref().ok_or(InventoryError::NoServer)?;
        let outcome = service.try_add_item_to_player(
            &mut self.registry,
            player,
            item_id,
            amount,
            ammo,
            selected,
        )?;
        self.publish(&outcome.deltas);
        Ok(outcome)
    }

    /// Spends rounds from a quick bar weapon. Returns the rounds left.
    pub fn consume_ammo(
        &mut self,
        player: PlayerRef,
        quick_index: i32,
        amount: u32,
    ) -> Result<u32, InventoryError> {
        let service = self.service.as_ref().ok_or(InventoryError::NoServer)?;
        let delta = service.try_consume_ammo(&mut self.registry, player, quick_index, amount)?;
        let left = delta.changes.last().map_or(0, |change| change.slot.ammo());
        self.publish(&[delta]);
        Ok(left)
    }

    /// Empties the quick bar and main inventory of `player`, e.g. on respawn.
    pub fn clear_player_containers(&mut self, player: PlayerRef) -> Result<(), InventoryError> {
        let service = self.service.as_ref().ok_or(InventoryError::NoServer)?;
        let deltas = service.clear_player_containers(&mut self.registry, player);
        self.publish(&deltas);
        Ok(())
    }

    // Incoming

    pub fn receive_bytes(
        &mut self,
        player: PlayerRef,
        bytes: &[u8],
        now: Instant,
    ) -> Result<(), InventoryServerError> {
        let message = ClientMessage::from_bytes(bytes).map_err(|source| {
            warn!("malformed packet from {:?}", player);
            InventoryServerError::Wire { player, source }
        })?;
        self.receive_message(player, message, now)
    }

    /// Reads every buffered packet of `player` from `receiver`. Failures are
    /// reported as [`ErrorEvent`](crate::ErrorEvent)s and do not stop the
    /// drain.
    pub fn receive_all(
        &mut self,
        player: PlayerRef,
        receiver: &mut dyn PacketReceiver,
        now: Instant,
    ) {
        loop {
            match receiver.receive() {
                Ok(Some(bytes)) => {
                    if let Err(error) = self.receive_bytes(player, bytes, now) {
                        self.events.push_error(error);
                    }
                }
                Ok(None) => break,
                Err(source) => {
                    self.events
                        .push_error(InventoryServerError::Recv { player, source });
                    break;
                }
            }
        }
    }

    pub fn receive_message(
        &mut self,
        player: PlayerRef,
        message: ClientMessage,
        now: Instant,
    ) -> Result<(), InventoryServerError> {
        if !self.view.sessions().contains(&player) {
            warn!("message from {:?} without a session", player);
            return Err(InventoryServerError::UnknownSession { player });
        }
        debug!("{:?} sent {:?}", player, message);

        match message {
            ClientMessage::OpenContainer { id } => self.handle_open(player, id, now),
            ClientMessage::CloseContainer { id } => self.handle_close(player, id),
            ClientMessage::Transfer {
                from,
                from_index,
                to,
                to_index,
                amount,
                request_id,
            } => {
                let from = from.normalized_for(player);
                let to = to.normalized_for(player);
                let result = match &self.service {
                    Some(service) => service
                        .try_transfer(
                            &mut self.registry,
                            player,
                            &from,
                            from_index,
                            &to,
                            to_index,
                            amount,
                        )
                        .map(|outcome| outcome.deltas),
                    None => Err(InventoryError::NoServer),
                };
                self.finish(player, request_id, result);
            }
            ClientMessage::Pickup {
                item_id,
                amount,
                ammo,
                request_id,
            } => self.handle_pickup(player, item_id, amount, ammo, request_id),
            ClientMessage::Reload {
                quick_index,
                request_id,
            } => {
                // a negative index reloads the selected quick slot
                let quick_index = match self.view.sessions().selected_quick(&player) {
                    Some(selected) if quick_index < 0 => selected as i32,
                    _ => quick_index,
                };
                let result = match &self.service {
                    Some(service) => service.try_reload_weapon(&mut self.registry, player, quick_index),
                    None => Err(InventoryError::NoServer),
                };
                match result {
                    Ok(outcome) => {
                        self.publish(&outcome.deltas);
                        self.view.send_ack(
                            &player,
                            AckMessage {
                                request_id,
                                ok: true,
                                message: outcome.new_ammo.to_string(),
                            },
                        );
                    }
                    Err(error) => {
                        self.view
                            .send_ack(&player, AckMessage::refused(request_id, error));
                    }
                }
            }
            ClientMessage::Drop {
                global_index,
                count,
                request_id,
            } => self.handle_drop(player, global_index, count, request_id),
            ClientMessage::SelectQuickSlot { index } => self.handle_select(player, index),
            ClientMessage::FullResync => self.handle_full_resync(player),
        }

        self.drain_view_errors();
        Ok(())
    }

    /// Expires stale pending opens.
    pub fn update(&mut self, now: Instant) {
        for (id, viewer) in self.waitlist.expire(now) {
            self.events.push_expired_open(id, viewer);
        }
        self.drain_view_errors();
    }

    // Handlers

    fn handle_open(&mut self, viewer: PlayerRef, id: ContainerId, now: Instant) {
        let id = id.normalized_for(viewer);
        if self.view.is_watching(&id, &viewer) {
            debug!("{:?} already watches {}", viewer, id);
            return;
        }
        let Some(service) = &self.service else {
            warn!("open of {} by {:?} ignored, no service bound", id, viewer);
            return;
        };
        if !self.registry.contains(&id) {
            if self.waitlist.queue(now, id, viewer) {
                info!("queued open of {} by {:?} until it is registered", id, viewer);
            }
            return;
        }
        match service.try_open_container(&self.registry, viewer, &id) {
            Ok(snapshot) => self.grant(viewer, snapshot),
            Err(error) => warn!("{:?} cannot open {}: {}", viewer, id, error),
        }
    }

    fn handle_close(&mut self, viewer: PlayerRef, id: ContainerId) {
        let id = id.normalized_for(viewer);
        let was_open = self.view.remove_viewer(&id, &viewer);
        let was_pending = self.waitlist.cancel(&id, &viewer);
        if was_open || was_pending {
            self.closed.insert(viewer, id);
            debug!("{:?} closed {}", viewer, id);
        }
    }

    fn handle_pickup(
        &mut self,
        player: PlayerRef,
        item_id: String,
        amount: u32,
        ammo: u32,
        request_id: ClientRequestId,
    ) {
        match self.add_item_to_player(player, &item_id, amount, ammo) {
            Ok(outcome) => match outcome.reason() {
                None => self.view.send_ack(&player, AckMessage::ok(request_id)),
                Some(error) => {
                    self.events.push_overflow(Overflow {
                        player,
                        item_id,
                        amount: outcome.leftover,
                        ammo,
                    });
                    self.view
                        .send_ack(&player, AckMessage::refused(request_id, error));
                }
            },
            Err(error) => {
                self.view
                    .send_ack(&player, AckMessage::refused(request_id, error));
            }
        }
    }

    fn handle_drop(
        &mut self,
        player: PlayerRef,
        global_index: i32,
        count: i32,
        request_id: ClientRequestId,
    ) {
        let result = match &self.service {
            Some(service) => service
                .try_resolve_global_index(&self.registry, player, global_index)
                .and_then(|address| {
                    service.try_remove(
                        &mut self.registry,
                        player,
                        &address.id,
                        address.index as i32,
                        count,
                    )
                }),
            None => Err(InventoryError::NoServer),
        };
        match result {
            Ok(outcome) => {
                self.publish(&[outcome.delta]);
                self.events.push_drop(Dropped {
                    player,
                    slot: outcome.removed,
                });
                self.view.send_ack(&player, AckMessage::ok(request_id));
            }
            Err(error) => {
                self.view
                    .send_ack(&player, AckMessage::refused(request_id, error));
            }
        }
    }

    fn handle_select(&mut self, player: PlayerRef, index: i32) {
        let capacity = self
            .registry
            .get(&ContainerId::player_quick(player))
            .map_or(self.config.quick_slots, Container::capacity);
        let selected = match usize::try_from(index) {
            Ok(index) if index < capacity => Some(index),
            Ok(index) => {
                warn!("{:?} selected quick slot {} of {}", player, index, capacity);
                return;
            }
            Err(_) => None,
        };
        self.view
            .sessions_mut()
            .set_selected_quick(&player, selected);
    }

    fn handle_full_resync(&mut self, player: PlayerRef) {
        for id in [ContainerId::player_quick(player), ContainerId::player_main(player)] {
            let Some(container) = self.registry.get(&id) else {
                continue;
            };
            if !container.can_player_access(player) {
                continue;
            }
            let snapshot = container.snapshot();
            self.grant(player, snapshot);
        }
    }

    // Helpers

    pub(crate) fn grant(&mut self, viewer: PlayerRef, snapshot: ContainerSnapshot) {
        self.view.add_viewer(snapshot.id, viewer);
        self.closed.remove(viewer, snapshot.id);
        self.view.send_snapshot_to(&viewer, &snapshot);
    }

    pub(crate) fn revoke(&mut self, viewer: PlayerRef, id: &ContainerId) {
        if self.view.remove_viewer(id, &viewer) {
            self.closed.insert(viewer, *id);
        }
    }

    fn finish(
        &mut self,
        player: PlayerRef,
        request_id: ClientRequestId,
        result: Result<Vec<ContainerDelta>, InventoryError>,
    ) {
        match result {
            Ok(deltas) => {
                self.publish(&deltas);
                self.view.send_ack(&player, AckMessage::ok(request_id));
            }
            Err(error) => {
                debug!("request {} of {:?} refused: {}", request_id, player, error);
                self.view
                    .send_ack(&player, AckMessage::refused(request_id, error));
            }
        }
    }

    /// Broadcasts `deltas`, then despawns any corpse they emptied.
    fn publish(&mut self, deltas: &[ContainerDelta]) {
        for delta in deltas {
            self.view.broadcast_delta(delta);
        }
        let mut emptied = Vec::new();
        for delta in deltas {
            if delta.id.kind != ContainerKind::Corpse || emptied.contains(&delta.id) {
                continue;
            }
            if self
                .registry
                .get(&delta.id)
                .is_some_and(|corpse| corpse.non_empty_count() == 0)
            {
                emptied.push(delta.id);
            }
        }
        for id in emptied {
            info!("corpse {} is empty, despawning", id);
            self.unregister_container(&id);
            self.events.push_corpse_despawn(id.object);
        }
    }

    fn drain_view_errors(&mut self) {
        for error in self.view.take_errors() {
            self.events.push_error(error);
        }
    }
}
