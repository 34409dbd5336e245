use thiserror::Error;

use coffer_shared::{RecvError, SendError, WireError};

/// Errors surfaced by the inventory client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryClientError {
    /// Packet from the server could not be decoded
    #[error("Malformed packet from the server: {0}")]
    Wire(#[from] WireError),

    /// Packet could not be handed to the transport
    #[error("Failed to send packet to the server")]
    Send(#[from] SendError),

    /// Packet could not be read from the transport
    #[error("Failed to receive packet from the server")]
    Recv(#[from] RecvError),

    /// Too many requests were issued before the local player was bound
    #[error("{limit} requests are already waiting for the local player to be bound")]
    DeferredQueueFull { limit: usize },
}
