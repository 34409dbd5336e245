use std::collections::HashMap;

use log::{trace, warn};

use coffer_shared::{PacketSender, PlayerRef};

use crate::error::InventoryServerError;

/// Connection state of one player.
pub struct PlayerSession {
    sender: Box<dyn PacketSender>,
    selected_quick: Option<usize>,
}

impl PlayerSession {
    pub fn new(sender: Box<dyn PacketSender>) -> Self {
        Self {
            sender,
            selected_quick: None,
        }
    }

    pub fn selected_quick(&self) -> Option<usize> {
        self.selected_quick
    }
}

/// Connected players and their outgoing packet pipes.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<PlayerRef, PlayerSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        player: PlayerRef,
        sender: Box<dyn PacketSender>,
    ) -> Result<(), InventoryServerError> {
        if self.sessions.contains_key(&player) {
            return Err(InventoryServerError::AlreadyConnected { player });
        }
        self.sessions.insert(player, PlayerSession::new(sender));
        Ok(())
    }

    pub fn remove(&mut self, player: &PlayerRef) -> Option<PlayerSession> {
        self.sessions.remove(player)
    }

    pub fn contains(&self, player: &PlayerRef) -> bool {
        self.sessions.contains_key(player)
    }

    pub fn get(&self, player: &PlayerRef) -> Option<&PlayerSession> {
        self.sessions.get(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerRef> {
        self.sessions.keys()
    }

    pub fn selected_quick(&self, player: &PlayerRef) -> Option<usize> {
        self.sessions.get(player).and_then(PlayerSession::selected_quick)
    }

    pub fn set_selected_quick(&mut self, player: &PlayerRef, index: Option<usize>) {
        if let Some(session) = self.sessions.get_mut(player) {
            session.selected_quick = index;
        }
    }

    /// Sends `payload` to `player`. A player with no session is skipped, a
    /// viewer may disconnect while a broadcast is in flight.
    pub fn send(&self, player: &PlayerRef, payload: &[u8]) -> Result<(), InventoryServerError> {
        let Some(session) = self.sessions.get(player) else {
            trace!("skipping send to {:?}, no session", player);
            return Ok(());
        };
        session.sender.send(payload).map_err(|source| {
            warn!("failed to send {} bytes to {:?}", payload.len(), player);
            InventoryServerError::Send {
                player: *player,
                source,
            }
        })
    }
}
