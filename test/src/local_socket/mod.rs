/// In-memory sockets connecting one server session to one client.
/// Packets are delivered in order and nothing is lost.
use coffer_shared::{PacketChannel, PacketReceiver, PacketSender};

/// Pair of connected server and client sockets for E2E testing
pub struct LocalSocketPair {
    pub server_sender: Box<dyn PacketSender>,
    pub server_receiver: Box<dyn PacketReceiver>,
    pub client_sender: Box<dyn PacketSender>,
    pub client_receiver: Box<dyn PacketReceiver>,
}

impl LocalSocketPair {
    pub fn new() -> Self {
        let (server_sender, client_receiver) = PacketChannel::unbounded();
        let (client_sender, server_receiver) = PacketChannel::unbounded();

        Self {
            server_sender,
            server_receiver,
            client_sender,
            client_receiver,
        }
    }
}

impl Default for LocalSocketPair {
    fn default() -> Self {
        Self::new()
    }
}
