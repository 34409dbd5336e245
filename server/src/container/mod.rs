mod container;
mod policy;
mod registry;

pub use container::Container;
pub use policy::{ContainerPolicy, ItemWhitelist, OpenAccess, OwnerOnly};
pub use registry::ContainerRegistry;
