use std::time::Instant;

use coffer_client::{ClientConfig, InventoryClient};
use coffer_server::{InventoryServer, ServerConfig};
use coffer_shared::{ContainerId, PacketReceiver, PlayerRef, Slot};

use crate::{helpers::test_catalog, LocalSocketPair, TestClient};

/// Server half of a test world: the server plus the receiving end of every
/// connected client's socket.
pub struct TestServer {
    pub server: InventoryServer,
    receivers: Vec<(PlayerRef, Box<dyn PacketReceiver>)>,
}

impl TestServer {
    /// Server with the default config and the test catalog bound.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            server: InventoryServer::with_catalog(config, test_catalog()),
            receivers: Vec::new(),
        }
    }

    /// Server with no service bound.
    pub fn without_service() -> Self {
        Self {
            server: InventoryServer::new(ServerConfig::default()),
            receivers: Vec::new(),
        }
    }

    /// Connects a player and binds the client to it. Containers are not
    /// spawned.
    pub fn connect(&mut self, raw: u64) -> TestClient {
        let mut client = self.connect_unbound(raw);
        client
            .client
            .bind_local(client.player)
            .expect("fresh clients bind");
        client
    }

    /// Connects a player whose client does not know its local player yet.
    pub fn connect_unbound(&mut self, raw: u64) -> TestClient {
        self.connect_with(raw, ClientConfig::default())
    }

    pub fn connect_with(&mut self, raw: u64, config: ClientConfig) -> TestClient {
        let player = PlayerRef::new(raw);
        let sockets = LocalSocketPair::new();

        self.server
            .connect_player(player, sockets.server_sender)
            .expect("player connects once");
        self.receivers.push((player, sockets.server_receiver));

        let client = InventoryClient::new(config, sockets.client_sender);
        TestClient::new(player, client, sockets.client_receiver)
    }

    /// Connects, binds and spawns the player's containers.
    pub fn join(&mut self, raw: u64) -> TestClient {
        let client = self.connect(raw);
        self.server
            .spawn_player(client.player)
            .expect("player containers register once");
        client
    }

    pub fn disconnect(&mut self, player: &PlayerRef) {
        self.receivers.retain(|(connected, _)| connected != player);
        self.server.disconnect_player(player);
    }

    /// Reads every packet the clients sent so far.
    pub fn receive(&mut self, now: Instant) {
        for (player, receiver) in self.receivers.iter_mut() {
            self.server.receive_all(*player, receiver.as_mut(), now);
        }
    }

    /// Slot as held by the server.
    pub fn slot(&self, id: &ContainerId, index: usize) -> Option<Slot> {
        self.server.container(id)?.slot(index).cloned()
    }
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new()
    }
}
