use std::sync::{Arc, Mutex};

use coffer_client::InventoryClient;
use coffer_shared::{ContainerId, PacketReceiver, PlayerRef, Slot};

/// Acknowledgements seen by a [`TestClient`], in arrival order.
pub type AckLog = Arc<Mutex<Vec<(bool, String)>>>;

/// Client half of a test session: the client, its end of the socket pair
/// and a log of every acknowledgement routed through [`TestClient::on_ack`].
pub struct TestClient {
    pub player: PlayerRef,
    pub client: InventoryClient,
    receiver: Box<dyn PacketReceiver>,
    acks: AckLog,
}

impl TestClient {
    pub fn new(player: PlayerRef, client: InventoryClient, receiver: Box<dyn PacketReceiver>) -> Self {
        Self {
            player,
            client,
            receiver,
            acks: AckLog::default(),
        }
    }

    /// Callback that records the acknowledgement in this client's log.
    pub fn on_ack(&self) -> impl FnOnce(bool, &str) + Send + 'static {
        let acks = self.acks.clone();
        move |ok, message| {
            if let Ok(mut acks) = acks.lock() {
                acks.push((ok, message.to_string()));
            }
        }
    }

    pub fn acks(&self) -> Vec<(bool, String)> {
        self.acks.lock().map(|acks| acks.clone()).unwrap_or_default()
    }

    pub fn last_ack(&self) -> Option<(bool, String)> {
        self.acks().pop()
    }

    /// Reads every packet the server sent so far.
    pub fn receive(&mut self) {
        self.client.receive_all(self.receiver.as_mut());
    }

    pub fn quick_id(&self) -> ContainerId {
        ContainerId::player_quick(self.player)
    }

    pub fn main_id(&self) -> ContainerId {
        ContainerId::player_main(self.player)
    }

    /// Slot as mirrored by the client.
    pub fn slot(&self, id: &ContainerId, index: usize) -> Option<Slot> {
        self.client.snapshot(id)?.slot(index).cloned()
    }
}
