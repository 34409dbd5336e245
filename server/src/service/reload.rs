use log::debug;

use coffer_shared::{ContainerDelta, ContainerId, InventoryError, ItemState, PlayerRef, Slot};

use crate::{
    container::ContainerRegistry,
    service::{container_service::slot_index, ContainerService, ReloadOutcome},
};

impl ContainerService {
    /// Tops up the magazine of the weapon in quick slot `quick_index`.
    ///
    /// Ammo is taken from the main inventory first, then from the quick bar
    /// (never from the weapon slot itself). A weapon with a magazine size of
    /// zero uses the configured default.
    pub fn try_reload_weapon(
        &self,
        registry: &mut ContainerRegistry,
        player: PlayerRef,
        quick_index: i32,
    ) -> Result<ReloadOutcome, InventoryError> {
        let (quick, main) = self.player_containers(registry, player)?;
        let weapon_index = slot_index(quick_index)?;

        let Some(quick_container) = registry.get(&quick) else {
            return Err(InventoryError::PlayerContainersMissing);
        };
        let weapon = quick_container
            .slot(weapon_index)
            .ok_or(InventoryError::BadIndex)?;
        let Some(weapon_id) = weapon.item_id() else {
            return Err(InventoryError::NoWeapon);
        };
        let spec = self
            .item(weapon_id)?
            .weapon()
            .ok_or(InventoryError::NotAWeapon)?;

        let magazine_size = if spec.magazine_size == 0 {
            self.default_magazine_size()
        } else {
            spec.magazine_size
        };
        let ammo_id = match spec.ammo_item_id.as_deref() {
            Some(ammo_id) if !ammo_id.is_empty() => ammo_id.to_string(),
            _ => return Err(InventoryError::WeaponHasNoAmmoType),
        };

        let current = weapon.ammo();
        let need = magazine_size.saturating_sub(current);
        if need == 0 {
            return Ok(ReloadOutcome {
                new_ammo: current,
                deltas: Vec::new(),
            });
        }

        // plan every take before writing anything
        let mut remaining = need;
        let main_takes = plan_takes(registry, &main, &ammo_id, None, &mut remaining);
        let quick_takes = plan_takes(registry, &quick, &ammo_id, Some(weapon_index), &mut remaining);
        let taken = need - remaining;
        if taken == 0 {
            return Err(InventoryError::NoAmmoItems);
        }

        let mut deltas = Vec::with_capacity(3);
        for (id, takes) in [(main, main_takes), (quick, quick_takes)] {
            if takes.is_empty() {
                continue;
            }
            let Some(container) = registry.get_mut(&id) else {
                continue;
            };
            let mut delta = container.begin_delta();
            for (index, slot) in takes {
                container.commit(index, slot, &mut delta);
            }
            deltas.push(delta);
        }

        let new_ammo = current + taken.min(need);
        let Some(quick_container) = registry.get_mut(&quick) else {
            return Err(InventoryError::PlayerContainersMissing);
        };
        let mut reloaded = quick_container
            .slot(weapon_index)
            .cloned()
            .unwrap_or_default();
        let durability = reloaded.state().map_or(0, |state| state.durability);
        reloaded.set_state(Some(ItemState::new(new_ammo, durability)));

        let mut weapon_delta = quick_container.begin_delta();
        quick_container.commit(weapon_index, reloaded, &mut weapon_delta);
        deltas.push(weapon_delta);

        debug!(
            "{:?} reloaded quick slot {} to {}/{}",
            player, weapon_index, new_ammo, magazine_size
        );

        Ok(ReloadOutcome { new_ammo, deltas })
    }

    /// Spends `amount` rounds from the weapon in quick slot `quick_index`.
    pub fn try_consume_ammo(
        &self,
        registry: &mut ContainerRegistry,
        player: PlayerRef,
        quick_index: i32,
        amount: u32,
    ) -> Result<ContainerDelta, InventoryError> {
        let quick = ContainerId::player_quick(player);
        let index = slot_index(quick_index)?;
        let container = registry
            .get_mut(&quick)
            .ok_or(InventoryError::PlayerContainersMissing)?;
        let slot = container.slot(index).ok_or(InventoryError::BadIndex)?;
        if slot.is_empty() {
            return Err(InventoryError::NoWeapon);
        }
        if slot.ammo() < amount {
            return Err(InventoryError::NoAmmo);
        }

        let mut fired = slot.clone();
        let durability = fired.state().map_or(0, |state| state.durability);
        fired.set_state(Some(ItemState::new(slot.ammo() - amount, durability)));

        let mut delta = container.begin_delta();
        container.commit(index, fired, &mut delta);
        Ok(delta)
    }
}

/// New contents of every slot of `id` that gives up ammo, in slot order.
fn plan_takes(
    registry: &ContainerRegistry,
    id: &ContainerId,
    ammo_id: &str,
    skip: Option<usize>,
    remaining: &mut u32,
) -> Vec<(usize, Slot)> {
    let mut takes = Vec::new();
    let Some(container) = registry.get(id) else {
        return takes;
    };
    for (index, slot) in container.slots().iter().enumerate() {
        if *remaining == 0 {
            break;
        }
        if Some(index) == skip || !slot.holds(ammo_id) {
            continue;
        }
        let mut after = slot.clone();
        *remaining -= after.take(*remaining);
        takes.push((index, after));
    }
    takes
}
