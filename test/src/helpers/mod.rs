pub mod assertions;
pub mod packet_exchange;
pub mod test_catalog;
pub mod test_client;
pub mod test_server;

pub use assertions::client_mirrors_server;
pub use packet_exchange::{exchange_packets, exchange_packets_at, exchange_packets_n_times};
pub use test_catalog::{
    test_catalog, test_items, AMMO, BERRIES, PISTOL, PISTOL_MAGAZINE, SHIELD, SWORD, WOOD,
};
pub use test_client::{AckLog, TestClient};
pub use test_server::TestServer;

/// Installs `env_logger` once per test binary. Safe to call from every test.
pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}
