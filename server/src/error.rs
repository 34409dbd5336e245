use thiserror::Error;

use coffer_shared::{ContainerId, InventoryError, PlayerRef, RecvError, SendError, WireError};

/// Errors that can occur while registering containers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A container with the same identity is live
    #[error("Container {id} is already registered. Unregister it before registering a replacement")]
    AlreadyRegistered { id: ContainerId },
}

/// Errors surfaced by the inventory server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryServerError {
    /// Packet from a player could not be decoded
    #[error("Malformed packet from player {player:?}: {source}")]
    Wire {
        player: PlayerRef,
        #[source]
        source: WireError,
    },

    /// Message arrived for a player with no session
    #[error("No session for player {player:?}. Connect the player before routing messages")]
    UnknownSession { player: PlayerRef },

    /// Player already has a session
    #[error("Player {player:?} is already connected")]
    AlreadyConnected { player: PlayerRef },

    /// Packet could not be handed to the transport
    #[error("Failed to send packet to player {player:?}")]
    Send {
        player: PlayerRef,
        #[source]
        source: SendError,
    },

    /// Packet could not be read from the transport
    #[error("Failed to receive packet from player {player:?}")]
    Recv {
        player: PlayerRef,
        #[source]
        source: RecvError,
    },

    /// Container registration failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A server-side inventory operation was refused
    #[error("Inventory operation refused: {0}")]
    Inventory(#[from] InventoryError),
}
