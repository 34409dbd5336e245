use log::{debug, info};

use coffer_shared::{ContainerDelta, ContainerId, InventoryError, PlayerRef, Slot};

use crate::{
    container::ContainerRegistry,
    service::{
        container_service::slot_index, ContainerService, CorpseContents, RemoveOutcome,
    },
};

impl ContainerService {
    /// Takes up to `count` units out of one slot, at least one. The slot is
    /// cleared when it runs out.
    pub fn try_remove(
        &self,
        registry: &mut ContainerRegistry,
        player: PlayerRef,
        id: &ContainerId,
        index: i32,
        count: i32,
    ) -> Result<RemoveOutcome, InventoryError> {
        let index = slot_index(index)?;
        let container = registry
            .get_mut(id)
            .ok_or(InventoryError::ContainerNotFound)?;
        if !container.can_player_access(player) {
            return Err(InventoryError::NoAccess);
        }
        let slot = container.slot(index).ok_or(InventoryError::BadIndex)?;
        if slot.is_empty() {
            return Err(InventoryError::Empty);
        }

        let current = slot.count();
        let requested = u32::try_from(count).unwrap_or(0).clamp(1, current);

        let mut removed = slot.clone();
        removed.set_count(requested);
        let mut remaining = slot.clone();
        remaining.set_count(current - requested);

        let mut delta = container.begin_delta();
        container.commit(index, remaining, &mut delta);

        debug!("{:?} removed {:?} from {}[{}]", player, removed, id, index);
        Ok(RemoveOutcome { removed, delta })
    }

    /// Empties every slot of the player's quick bar and main inventory.
    /// Missing containers are skipped.
    pub fn clear_player_containers(
        &self,
        registry: &mut ContainerRegistry,
        player: PlayerRef,
    ) -> Vec<ContainerDelta> {
        let mut deltas = Vec::new();
        for id in [ContainerId::player_quick(player), ContainerId::player_main(player)] {
            let Some(container) = registry.get_mut(&id) else {
                continue;
            };
            let occupied: Vec<usize> = (0..container.capacity())
                .filter(|index| container.slot(*index).is_some_and(|slot| !slot.is_empty()))
                .collect();
            if occupied.is_empty() {
                continue;
            }
            let mut delta = container.begin_delta();
            for index in occupied {
                container.commit(index, Slot::empty(), &mut delta);
            }
            deltas.push(delta);
        }
        deltas
    }

    /// Moves every non-empty slot of the player's containers out, quick bar
    /// first, leaving them cleared.
    pub fn take_corpse_contents(
        &self,
        registry: &mut ContainerRegistry,
        player: PlayerRef,
    ) -> Result<CorpseContents, InventoryError> {
        let (quick, main) = self.player_containers(registry, player)?;

        let mut slots = Vec::new();
        for id in [quick, main] {
            if let Some(container) = registry.get(&id) {
                slots.extend(container.slots().iter().filter(|slot| !slot.is_empty()).cloned());
            }
        }
        let deltas = self.clear_player_containers(registry, player);

        info!("packed {} stacks of {:?} for a corpse", slots.len(), player);
        Ok(CorpseContents { slots, deltas })
    }
}
