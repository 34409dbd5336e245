use std::collections::{HashMap, HashSet};

use coffer_shared::{ContainerId, PlayerRef};

/// Many-to-many relation between containers and the players viewing them,
/// indexed both ways so either side can be torn down at once.
#[derive(Default)]
pub struct WatcherIndex {
    container_to_viewers: HashMap<ContainerId, HashSet<PlayerRef>>,
    viewer_to_containers: HashMap<PlayerRef, HashSet<ContainerId>>,
}

impl WatcherIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `viewer` was already watching `id`.
    pub fn insert(&mut self, id: ContainerId, viewer: PlayerRef) -> bool {
        let added = self
            .container_to_viewers
            .entry(id)
            .or_default()
            .insert(viewer);
        self.viewer_to_containers
            .entry(viewer)
            .or_default()
            .insert(id);
        added
    }

    /// Returns false if `viewer` was not watching `id`.
    pub fn remove(&mut self, id: &ContainerId, viewer: &PlayerRef) -> bool {
        let mut removed = false;
        if let Some(viewers) = self.container_to_viewers.get_mut(id) {
            removed = viewers.remove(viewer);
            if viewers.is_empty() {
                self.container_to_viewers.remove(id);
            }
        }
        if let Some(containers) = self.viewer_to_containers.get_mut(viewer) {
            containers.remove(id);
            if containers.is_empty() {
                self.viewer_to_containers.remove(viewer);
            }
        }
        removed
    }

    /// Drops every watch of `viewer`, returning the containers it watched.
    pub fn remove_viewer(&mut self, viewer: &PlayerRef) -> Vec<ContainerId> {
        let Some(containers) = self.viewer_to_containers.remove(viewer) else {
            return Vec::new();
        };
        for id in &containers {
            if let Some(viewers) = self.container_to_viewers.get_mut(id) {
                viewers.remove(viewer);
                if viewers.is_empty() {
                    self.container_to_viewers.remove(id);
                }
            }
        }
        containers.into_iter().collect()
    }

    /// Drops every watch on `id`, returning the players that watched it.
    pub fn remove_container(&mut self, id: &ContainerId) -> Vec<PlayerRef> {
        let Some(viewers) = self.container_to_viewers.remove(id) else {
            return Vec::new();
        };
        for viewer in &viewers {
            if let Some(containers) = self.viewer_to_containers.get_mut(viewer) {
                containers.remove(id);
                if containers.is_empty() {
                    self.viewer_to_containers.remove(viewer);
                }
            }
        }
        viewers.into_iter().collect()
    }

    pub fn contains(&self, id: &ContainerId, viewer: &PlayerRef) -> bool {
        self.container_to_viewers
            .get(id)
            .is_some_and(|viewers| viewers.contains(viewer))
    }

    /// Players watching `id`. Empty when nobody is.
    pub fn watchers(&self, id: &ContainerId) -> Vec<PlayerRef> {
        self.container_to_viewers
            .get(id)
            .map(|viewers| viewers.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn watched_by(&self, viewer: &PlayerRef) -> Vec<ContainerId> {
        self.viewer_to_containers
            .get(viewer)
            .map(|containers| containers.iter().copied().collect())
            .unwrap_or_default()
    }
}
