use log::debug;

use coffer_shared::{
    ContainerDelta, ContainerId, InventoryError, ItemState, PickupPriority, PlayerRef, Slot,
};

use crate::{
    container::{Container, ContainerRegistry},
    service::{AddOutcome, ContainerService},
};

impl ContainerService {
    /// Places `amount` units of `item_id` into the player's containers.
    ///
    /// Quick bar items try the quick bar first, starting with the selected
    /// quick slot, everything else tries the main inventory first. Each
    /// container gets a merge pass over existing stacks, then a fill pass
    /// over empty slots. New stacks carry `ammo` as their item state.
    pub fn try_add_item_to_player(
        &self,
        registry: &mut ContainerRegistry,
        player: PlayerRef,
        item_id: &str,
        amount: u32,
        ammo: u32,
        selected_quick: Option<usize>,
    ) -> Result<AddOutcome, InventoryError> {
        let item = self.item(item_id)?;
        let (quick, main) = self.player_containers(registry, player)?;

        let stack_limit = item.stack_limit();
        let order: [ContainerId; 2] = match item.priority {
            PickupPriority::QuickBar => [quick, main],
            PickupPriority::Main => [main, quick],
        };

        let mut outcome = AddOutcome {
            leftover: amount,
            deltas: Vec::new(),
        };

        for (position, id) in order.iter().enumerate() {
            if outcome.leftover == 0 {
                break;
            }
            let Some(container) = registry.get_mut(id) else {
                continue;
            };
            let mut placer = Placer {
                container,
                delta: None,
                item_id,
                stack_limit,
                ammo,
            };

            // the selected quick slot is an exact first target for quick bar items
            if position == 0 && item.priority == PickupPriority::QuickBar {
                if let Some(index) = selected_quick {
                    outcome.leftover = placer.place_at(index, outcome.leftover);
                }
            }
            outcome.leftover = placer.merge(outcome.leftover);
            outcome.leftover = placer.fill(outcome.leftover);

            if let Some(delta) = placer.delta {
                outcome.deltas.push(delta);
            }
        }

        debug!(
            "{:?} received {} of {} x{}",
            player,
            amount - outcome.leftover,
            item_id,
            amount
        );

        Ok(outcome)
    }
}

/// Writes units of one item into one container, collecting a delta.
struct Placer<'a> {
    container: &'a mut Container,
    delta: Option<ContainerDelta>,
    item_id: &'a str,
    stack_limit: u32,
    ammo: u32,
}

impl Placer<'_> {
    fn new_state(&self) -> Option<ItemState> {
        if self.ammo > 0 {
            Some(ItemState::with_ammo(self.ammo))
        } else {
            None
        }
    }

    fn write(&mut self, index: usize, slot: Slot) {
        let delta = self
            .delta
            .get_or_insert_with(|| self.container.begin_delta());
        self.container.commit(index, slot, delta);
    }

    /// Stacks onto, or fills, exactly slot `index`.
    fn place_at(&mut self, index: usize, left: u32) -> u32 {
        let Some(slot) = self.container.slot(index) else {
            return left;
        };
        if slot.is_empty() {
            let put = left.min(self.stack_limit);
            let incoming = self.new_slot(put);
            if put == 0 || !self.container.can_accept(index, &incoming) {
                return left;
            }
            self.write(index, incoming);
            return left - put;
        }
        if slot.holds(self.item_id) && slot.count() < self.stack_limit {
            let put = left.min(self.stack_limit - slot.count());
            let mut merged = slot.clone();
            merged.set_count(slot.count() + put);
            if merged.state().is_none() {
                merged.set_state(self.new_state());
            }
            self.write(index, merged);
            return left - put;
        }
        left
    }

    fn merge(&mut self, mut left: u32) -> u32 {
        for index in 0..self.container.capacity() {
            if left == 0 {
                break;
            }
            let Some(slot) = self.container.slot(index) else {
                continue;
            };
            if !slot.holds(self.item_id) || slot.count() >= self.stack_limit {
                continue;
            }
            let put = left.min(self.stack_limit - slot.count());
            let mut merged = slot.clone();
            merged.set_count(slot.count() + put);
            self.write(index, merged);
            left -= put;
        }
        left
    }

    fn fill(&mut self, mut left: u32) -> u32 {
        for index in 0..self.container.capacity() {
            if left == 0 {
                break;
            }
            if !self.container.slot(index).is_some_and(Slot::is_empty) {
                continue;
            }
            let put = left.min(self.stack_limit);
            let incoming = self.new_slot(put);
            if !self.container.can_accept(index, &incoming) {
                continue;
            }
            self.write(index, incoming);
            left -= put;
        }
        left
    }

    fn new_slot(&self, count: u32) -> Slot {
        match self.new_state() {
            Some(state) => Slot::with_state(self.item_id, count, state),
            None => Slot::new(self.item_id, count),
        }
    }
}
