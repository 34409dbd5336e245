use std::sync::Arc;

use log::{debug, warn};

use coffer_shared::{
    ContainerId, ContainerSnapshot, InventoryError, ItemCatalog, ItemDef, PlayerRef,
};

use crate::{container::ContainerRegistry, service::SlotAddress};

/// Executes every container mutation on the authoritative host.
///
/// The service holds no container state itself. It validates a request
/// against the registry, plans the new slot contents on clones, and only then
/// commits them, so a refused request never mutates anything.
pub struct ContainerService {
    catalog: Arc<dyn ItemCatalog>,
    default_magazine_size: u32,
}

impl ContainerService {
    pub fn new(catalog: Arc<dyn ItemCatalog>, default_magazine_size: u32) -> Self {
        Self {
            catalog,
            default_magazine_size,
        }
    }

    pub fn catalog(&self) -> &dyn ItemCatalog {
        self.catalog.as_ref()
    }

    pub(crate) fn item(&self, item_id: &str) -> Result<&ItemDef, InventoryError> {
        self.catalog.get(item_id).ok_or_else(|| {
            warn!("item {:?} is not in the catalog", item_id);
            InventoryError::ItemNotFound
        })
    }

    pub(crate) fn default_magazine_size(&self) -> u32 {
        self.default_magazine_size
    }

    /// Grants `viewer` a first view of `id`.
    pub fn try_open_container(
        &self,
        registry: &ContainerRegistry,
        viewer: PlayerRef,
        id: &ContainerId,
    ) -> Result<ContainerSnapshot, InventoryError> {
        let container = registry.get(id).ok_or(InventoryError::ContainerNotFound)?;
        if !container.can_player_access(viewer) {
            return Err(InventoryError::AccessDenied);
        }
        debug!("{:?} opened {} at version {}", viewer, id, container.version());
        Ok(container.snapshot())
    }

    /// Quick bar and main inventory identities of `player`, both registered.
    pub fn player_containers(
        &self,
        registry: &ContainerRegistry,
        player: PlayerRef,
    ) -> Result<(ContainerId, ContainerId), InventoryError> {
        let quick = ContainerId::player_quick(player);
        let main = ContainerId::player_main(player);
        if !registry.contains(&quick) || !registry.contains(&main) {
            return Err(InventoryError::PlayerContainersMissing);
        }
        Ok((quick, main))
    }

    /// Maps a global slot index onto the player containers: the quick bar
    /// first, then the main inventory.
    pub fn try_resolve_global_index(
        &self,
        registry: &ContainerRegistry,
        player: PlayerRef,
        global_index: i32,
    ) -> Result<SlotAddress, InventoryError> {
        let (quick, main) = self.player_containers(registry, player)?;
        let index = usize::try_from(global_index).map_err(|_| InventoryError::BadIndex)?;
        let quick_capacity = registry.get(&quick).map_or(0, |c| c.capacity());
        let main_capacity = registry.get(&main).map_or(0, |c| c.capacity());

        if index < quick_capacity {
            Ok(SlotAddress { id: quick, index })
        } else if index < quick_capacity + main_capacity {
            Ok(SlotAddress {
                id: main,
                index: index - quick_capacity,
            })
        } else {
            Err(InventoryError::BadIndex)
        }
    }
}

/// Converts a client supplied index, refusing negatives.
pub(crate) fn slot_index(index: i32) -> Result<usize, InventoryError> {
    usize::try_from(index).map_err(|_| InventoryError::BadIndex)
}
