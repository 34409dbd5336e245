mod closed_watches;
mod inventory_server;
mod open_state;
mod server_config;
mod viewer_scope;

pub use inventory_server::InventoryServer;
pub use open_state::OpenState;
pub use server_config::ServerConfig;
pub use viewer_scope::ViewerScopeMut;
