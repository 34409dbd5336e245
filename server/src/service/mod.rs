mod add_item;
mod container_service;
mod outcome;
mod reload;
mod remove;
mod transfer;

pub use container_service::ContainerService;
pub use outcome::{
    AddOutcome, CorpseContents, ReloadOutcome, RemoveOutcome, SlotAddress, TransferOutcome,
};
