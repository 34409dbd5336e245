use coffer_shared::{ContainerId, PlayerRef};

use super::InventoryServer;

/// Server-driven control over which containers a viewer watches.
pub struct ViewerScopeMut<'s> {
    server: &'s mut InventoryServer,
    viewer: PlayerRef,
}

impl<'s> ViewerScopeMut<'s> {
    pub(crate) fn new(server: &'s mut InventoryServer, viewer: PlayerRef) -> Self {
        Self { server, viewer }
    }

    /// Returns true if the viewer watches the container
    pub fn has(&self, id: &ContainerId) -> bool {
        self.server.view().is_watching(id, &self.viewer)
    }

    /// Starts watching a registered container and sends its snapshot.
    /// Access checks are skipped.
    pub fn include(&mut self, id: &ContainerId) -> &mut Self {
        if let Some(container) = self.server.container(id) {
            let snapshot = container.snapshot();
            self.server.grant(self.viewer, snapshot);
        }

        self
    }

    /// Stops watching the container
    pub fn exclude(&mut self, id: &ContainerId) -> &mut Self {
        self.server.revoke(self.viewer, id);

        self
    }

    /// Stops watching every container
    pub fn clear(&mut self) -> &mut Self {
        for id in self.server.view().watched_by(&self.viewer) {
            self.server.revoke(self.viewer, &id);
        }

        self
    }
}
