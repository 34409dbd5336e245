use std::collections::HashSet;

use coffer_shared::{ContainerId, PlayerRef, Slot};

/// Access and placement rules of a container.
pub trait ContainerPolicy: Send + Sync {
    /// Whether `player` may view or mutate the container.
    fn can_player_access(&self, id: &ContainerId, player: PlayerRef) -> bool;

    /// Whether `incoming` may be written into slot `index`.
    fn can_accept(&self, _index: usize, _incoming: &Slot) -> bool {
        true
    }
}

/// Only the owning player has access. Used for quick bars and main
/// inventories.
pub struct OwnerOnly;

impl ContainerPolicy for OwnerOnly {
    fn can_player_access(&self, id: &ContainerId, player: PlayerRef) -> bool {
        !player.is_none() && id.owner == player
    }
}

/// Any connected player has access. Used for chests and corpses.
pub struct OpenAccess;

impl ContainerPolicy for OpenAccess {
    fn can_player_access(&self, _id: &ContainerId, player: PlayerRef) -> bool {
        !player.is_none()
    }
}

/// Wraps another policy and only accepts the listed item ids.
pub struct ItemWhitelist<P: ContainerPolicy> {
    inner: P,
    item_ids: HashSet<String>,
}

impl<P: ContainerPolicy> ItemWhitelist<P> {
    pub fn new<I, S>(inner: P, item_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner,
            item_ids: item_ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl<P: ContainerPolicy> ContainerPolicy for ItemWhitelist<P> {
    fn can_player_access(&self, id: &ContainerId, player: PlayerRef) -> bool {
        self.inner.can_player_access(id, player)
    }

    fn can_accept(&self, index: usize, incoming: &Slot) -> bool {
        let Some(item_id) = incoming.item_id() else {
            return true;
        };
        self.item_ids.contains(item_id) && self.inner.can_accept(index, incoming)
    }
}
