use std::collections::HashMap;

use log::{info, warn};

use coffer_shared::ContainerId;

use crate::{container::Container, error::RegistryError};

/// Every live container, keyed by identity.
#[derive(Default)]
pub struct ContainerRegistry {
    containers: HashMap<ContainerId, Container>,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, container: Container) -> Result<(), RegistryError> {
        let id = *container.id();
        if self.containers.contains_key(&id) {
            warn!("container {} is already registered", id);
            return Err(RegistryError::AlreadyRegistered { id });
        }
        info!("registered container {}", id);
        self.containers.insert(id, container);
        Ok(())
    }

    pub fn unregister(&mut self, id: &ContainerId) -> Option<Container> {
        let container = self.containers.remove(id);
        if container.is_some() {
            info!("unregistered container {}", id);
        }
        container
    }

    pub fn get(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.get(id)
    }

    pub fn get_mut(&mut self, id: &ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(id)
    }

    pub fn contains(&self, id: &ContainerId) -> bool {
        self.containers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ContainerId> {
        self.containers.keys()
    }
}
