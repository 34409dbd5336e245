mod error;

pub use error::{RecvError, SendError};

use smol::channel::{self, Receiver, Sender, TryRecvError};

/// Outgoing half of a reliable, ordered packet pipe to one peer.
pub trait PacketSender: Send + Sync {
    fn send(&self, payload: &[u8]) -> Result<(), SendError>;
}

/// Incoming half of a reliable, ordered packet pipe from one peer.
pub trait PacketReceiver: Send {
    /// Next buffered packet, if any. Never blocks.
    fn receive(&mut self) -> Result<Option<&[u8]>, RecvError>;
}

/// In-process packet pipe, used by local sessions and tests.
pub struct PacketChannel;

impl PacketChannel {
    pub fn unbounded() -> (Box<dyn PacketSender>, Box<dyn PacketReceiver>) {
        let (packet_sender, packet_receiver) = channel::unbounded();
        let packet_receiver = PacketChannelReceiver::new(packet_receiver);
        (Box::new(packet_sender), Box::new(packet_receiver))
    }
}

impl PacketSender for Sender<Box<[u8]>> {
    fn send(&self, payload: &[u8]) -> Result<(), SendError> {
        self.send_blocking(payload.into()).map_err(|_| SendError)
    }
}

struct PacketChannelReceiver {
    receiver: Receiver<Box<[u8]>>,
    current_payload: Option<Box<[u8]>>,
}

impl PacketChannelReceiver {
    fn new(receiver: Receiver<Box<[u8]>>) -> Self {
        Self {
            receiver,
            current_payload: None,
        }
    }
}

impl PacketReceiver for PacketChannelReceiver {
    fn receive(&mut self) -> Result<Option<&[u8]>, RecvError> {
        match self.receiver.try_recv() {
            Ok(payload) => {
                self.current_payload = Some(payload);
                Ok(self.current_payload.as_deref())
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(_) => Err(RecvError),
        }
    }
}
