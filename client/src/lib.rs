//! # Coffer Client
//! The mirroring half of coffer. Caches a snapshot of every container the
//! local player watches, applies versioned deltas pushed by the server, and
//! routes acknowledgements back to the request that asked for them.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use coffer_shared::{
        ClientMessage, ContainerDelta, ContainerId, ContainerKind, ContainerSnapshot,
        InventoryError, ItemState, ObjectRef, PacketChannel, PacketReceiver, PacketSender,
        PlayerRef, ServerMessage, Slot,
    };
}

mod client;
mod client_config;
mod error;
mod events;
mod model;
mod pending;

pub use client::InventoryClient;
pub use client_config::ClientConfig;
pub use error::InventoryClientError;
pub use events::{
    ClientEvent, ClientEvents, ContainerChangedEvent, ErrorEvent, RequestTimeoutEvent,
    UnknownDeltaEvent,
};
pub use model::{ClientModel, DeltaApply};
pub use pending::{AckCallback, PendingOperations, TIMEOUT_MESSAGE};
