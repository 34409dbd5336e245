use std::time::Instant;

use super::{TestClient, TestServer};

/// Delivers everything the clients sent to the server, then everything the
/// server sent back to the clients.
pub fn exchange_packets(server: &mut TestServer, clients: &mut [&mut TestClient]) {
    exchange_packets_at(server, clients, Instant::now());
}

pub fn exchange_packets_at(server: &mut TestServer, clients: &mut [&mut TestClient], now: Instant) {
    server.receive(now);
    for client in clients.iter_mut() {
        client.receive();
    }
}

/// Exchange packets multiple times
pub fn exchange_packets_n_times(
    server: &mut TestServer,
    clients: &mut [&mut TestClient],
    n: usize,
) {
    for _ in 0..n {
        exchange_packets(server, clients);
    }
}
