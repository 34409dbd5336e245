//! # Coffer Server
//! The authoritative half of coffer. Owns every container, validates
//! inventory operations requested by players, and pushes snapshots and
//! versioned deltas to the players watching each container.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use coffer_shared::{
        AckMessage, ClientMessage, ContainerDelta, ContainerId, ContainerKind, ContainerSnapshot,
        InventoryError, ItemCatalog, ItemDef, ItemState, MemoryItemCatalog, ObjectRef,
        PacketChannel, PacketReceiver, PacketSender, PlayerRef, ServerMessage, Slot,
    };
}

mod container;
mod error;
mod events;
mod server;
mod service;
mod user;
mod view;
mod waitlist;

pub use container::{
    Container, ContainerPolicy, ContainerRegistry, ItemWhitelist, OpenAccess, OwnerOnly,
};
pub use error::{InventoryServerError, RegistryError};
pub use events::{
    CorpseDespawnedEvent, Dropped, DroppedEvent, ErrorEvent, OpenExpiredEvent, Overflow,
    OverflowEvent, ServerEvent, ServerEvents,
};
pub use server::{InventoryServer, OpenState, ServerConfig, ViewerScopeMut};
pub use service::{
    AddOutcome, ContainerService, CorpseContents, ReloadOutcome, RemoveOutcome, SlotAddress,
    TransferOutcome,
};
pub use user::{PlayerSession, SessionRegistry};
pub use view::{ViewService, WatcherIndex};
pub use waitlist::OpenWaitlist;
