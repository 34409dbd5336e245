use thiserror::Error;

/// Packet could not be handed to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to send packet. The receiving end of the channel was dropped")]
pub struct SendError;

/// Packet could not be read from the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to receive packet. The sending end of the channel was dropped")]
pub struct RecvError;
