//! # Coffer Shared
//! Container, slot and wire types shared between coffer-server & coffer-client.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod catalog;
mod container;
mod error;
mod transport;
mod types;
mod wire;

pub use naia_serde::{BitReader, BitWrite, FileBitWriter, Serde, SerdeErr};

pub use catalog::{
    ItemCatalog, ItemDef, ItemKind, MemoryItemCatalog, PickupPriority, PlaceableSpec, ToolSpec,
    WeaponSpec,
};
pub use container::{
    container_id::{ContainerId, ContainerKind},
    delta::{ContainerDelta, ContainerSnapshot, SlotChange},
    slot::{ItemState, Slot},
};
pub use error::{InventoryError, WireError};
pub use transport::{PacketChannel, PacketReceiver, PacketSender, RecvError, SendError};
pub use types::{ClientRequestId, ContainerVersion, ObjectRef, PlayerRef};
pub use wire::{
    AckMessage, ClientMessage, DeltaPush, ServerMessage, SlotArrays, SnapshotPush, MAX_WIRE_LEN,
    MAX_WIRE_STRING,
};
