pub mod container_id;
pub mod delta;
pub mod slot;
