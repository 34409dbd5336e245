use log::debug;

use coffer_shared::{ContainerId, InventoryError, PlayerRef, Slot};

use crate::{
    container::ContainerRegistry,
    service::{container_service::slot_index, ContainerService, TransferOutcome},
};

/// New contents of both slots, computed before anything is written.
struct TransferPlan {
    source: Slot,
    destination: Slot,
    swapped: bool,
}

impl ContainerService {
    /// Moves `amount` units from one slot to another.
    ///
    /// An `amount` of zero or less moves the whole source stack. Moving onto
    /// an empty slot moves at most one stack, moving onto the same item
    /// merges into the free space, and anything else is a whole-stack swap.
    #[allow(clippy::too_many_arguments)]
    pub fn try_transfer(
        &self,
        registry: &mut ContainerRegistry,
        player: PlayerRef,
        from: &ContainerId,
        from_index: i32,
        to: &ContainerId,
        to_index: i32,
        amount: i32,
    ) -> Result<TransferOutcome, InventoryError> {
        // negative indices are refused before any lookup
        let from_index = slot_index(from_index)?;
        let to_index = slot_index(to_index)?;

        let plan = self.plan_transfer(registry, player, from, from_index, to, to_index, amount)?;

        let mut deltas = Vec::with_capacity(2);
        if from == to {
            let Some(container) = registry.get_mut(from) else {
                return Err(InventoryError::FromNotFound);
            };
            let mut delta = container.begin_delta();
            container.commit(from_index, plan.source, &mut delta);
            container.commit(to_index, plan.destination, &mut delta);
            deltas.push(delta);
        } else {
            let Some(source) = registry.get_mut(from) else {
                return Err(InventoryError::FromNotFound);
            };
            let mut delta = source.begin_delta();
            source.commit(from_index, plan.source, &mut delta);
            deltas.push(delta);

            let Some(destination) = registry.get_mut(to) else {
                return Err(InventoryError::ToNotFound);
            };
            let mut delta = destination.begin_delta();
            destination.commit(to_index, plan.destination, &mut delta);
            deltas.push(delta);
        }

        debug!(
            "{:?} moved {}[{}] -> {}[{}], swapped: {}",
            player, from, from_index, to, to_index, plan.swapped
        );

        Ok(TransferOutcome {
            deltas,
            swapped: plan.swapped,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn plan_transfer(
        &self,
        registry: &ContainerRegistry,
        player: PlayerRef,
        from: &ContainerId,
        from_index: usize,
        to: &ContainerId,
        to_index: usize,
        amount: i32,
    ) -> Result<TransferPlan, InventoryError> {
        let source_container = registry.get(from).ok_or(InventoryError::FromNotFound)?;
        let destination_container = registry.get(to).ok_or(InventoryError::ToNotFound)?;

        if !source_container.can_player_access(player)
            || !destination_container.can_player_access(player)
        {
            return Err(InventoryError::NoAccess);
        }

        let (Some(source), Some(destination)) = (
            source_container.slot(from_index),
            destination_container.slot(to_index),
        ) else {
            return Err(InventoryError::BadIndex);
        };

        if from == to && from_index == to_index {
            return Err(InventoryError::SameSlot);
        }

        let Some(item_id) = source.item_id() else {
            return Err(InventoryError::Empty);
        };

        let source_count = source.count();
        let requested = if amount <= 0 {
            source_count
        } else {
            u32::try_from(amount).unwrap_or(u32::MAX)
        };
        let requested = requested.clamp(1, source_count);
        let whole_stack = requested == source_count;

        // empty destination: move up to one stack
        if destination.is_empty() {
            if !destination_container.can_accept(to_index, source) {
                return Err(InventoryError::CannotAccept);
            }
            let item = self.item(item_id)?;
            let moved = requested.min(item.stack_limit());

            let mut moved_slot = source.clone();
            moved_slot.set_count(moved);
            let mut remaining = source.clone();
            remaining.set_count(source_count - moved);

            return Ok(TransferPlan {
                source: remaining,
                destination: moved_slot,
                swapped: false,
            });
        }

        // same item: merge into free space, or swap full stacks
        if destination.holds(item_id) {
            let item = self.item(item_id)?;
            let space = item.max_stack.saturating_sub(destination.count());

            if item.max_stack <= 1 || space == 0 {
                return swap(
                    whole_stack,
                    source_container.can_accept(from_index, destination),
                    destination_container.can_accept(to_index, source),
                    source,
                    destination,
                );
            }

            if !destination_container.can_accept(to_index, source) {
                return Err(InventoryError::CannotAccept);
            }
            let moved = requested.min(space);

            let mut merged = destination.clone();
            merged.set_count(destination.count() + moved);
            if merged.state().is_none() {
                merged.set_state(source.state().copied());
            }
            let mut remaining = source.clone();
            remaining.set_count(source_count - moved);

            return Ok(TransferPlan {
                source: remaining,
                destination: merged,
                swapped: false,
            });
        }

        // different items: whole-stack swap only
        swap(
            whole_stack,
            source_container.can_accept(from_index, destination),
            destination_container.can_accept(to_index, source),
            source,
            destination,
        )
    }
}

fn swap(
    whole_stack: bool,
    source_accepts: bool,
    destination_accepts: bool,
    source: &Slot,
    destination: &Slot,
) -> Result<TransferPlan, InventoryError> {
    if !whole_stack {
        return Err(InventoryError::PartialSwapNotSupported);
    }
    if !source_accepts || !destination_accepts {
        return Err(InventoryError::CannotAccept);
    }
    Ok(TransferPlan {
        source: destination.clone(),
        destination: source.clone(),
        swapped: true,
    })
}
