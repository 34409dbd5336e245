use naia_serde::{BitReader, BitWrite, FileBitWriter, Serde, SerdeErr};

use crate::{
    error::WireError,
    wire::{
        i32_bit_length, read_i32, read_string, read_tag, read_u32, tag_bit_length, u32_bit_length,
        write_i32, write_tag, write_u32,
    },
    ClientRequestId, ContainerId,
};

/// Requests sent by a client to the inventory server.
///
/// Indices and amounts are signed so that out of range values from a client
/// reach the server and are refused there with a reason, instead of failing
/// to decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientMessage {
    OpenContainer {
        id: ContainerId,
    },
    CloseContainer {
        id: ContainerId,
    },
    Transfer {
        from: ContainerId,
        from_index: i32,
        to: ContainerId,
        to_index: i32,
        amount: i32,
        request_id: ClientRequestId,
    },
    Pickup {
        item_id: String,
        amount: u32,
        ammo: u32,
        request_id: ClientRequestId,
    },
    Reload {
        quick_index: i32,
        request_id: ClientRequestId,
    },
    /// Drop from a global index: quick bar slots first, then main inventory.
    Drop {
        global_index: i32,
        count: i32,
        request_id: ClientRequestId,
    },
    SelectQuickSlot {
        index: i32,
    },
    FullResync,
}

impl ClientMessage {
    fn tag(&self) -> u8 {
        match self {
            ClientMessage::OpenContainer { .. } => 0,
            ClientMessage::CloseContainer { .. } => 1,
            ClientMessage::Transfer { .. } => 2,
            ClientMessage::Pickup { .. } => 3,
            ClientMessage::Reload { .. } => 4,
            ClientMessage::Drop { .. } => 5,
            ClientMessage::SelectQuickSlot { .. } => 6,
            ClientMessage::FullResync => 7,
        }
    }

    /// Request id carried by the message, for those that are acknowledged.
    pub fn request_id(&self) -> Option<ClientRequestId> {
        match self {
            ClientMessage::Transfer { request_id, .. }
            | ClientMessage::Pickup { request_id, .. }
            | ClientMessage::Reload { request_id, .. }
            | ClientMessage::Drop { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    pub fn to_bytes(&self) -> Box<[u8]> {
        let mut writer = FileBitWriter::new();
        self.ser(&mut writer);
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let mut reader = BitReader::new(bytes);
        Self::de(&mut reader).map_err(|_| WireError::Malformed { message: "client" })
    }
}

impl Serde for ClientMessage {
    fn ser(&self, writer: &mut dyn BitWrite) {
        write_tag::<3>(self.tag(), writer);
        match self {
            ClientMessage::OpenContainer { id } | ClientMessage::CloseContainer { id } => {
                id.ser(writer);
            }
            ClientMessage::Transfer {
                from,
                from_index,
                to,
                to_index,
                amount,
                request_id,
            } => {
                from.ser(writer);
                write_i32(*from_index, writer);
                to.ser(writer);
                write_i32(*to_index, writer);
                write_i32(*amount, writer);
                write_u32(*request_id, writer);
            }
            ClientMessage::Pickup {
                item_id,
                amount,
                ammo,
                request_id,
            } => {
                item_id.ser(writer);
                write_u32(*amount, writer);
                write_u32(*ammo, writer);
                write_u32(*request_id, writer);
            }
            ClientMessage::Reload {
                quick_index,
                request_id,
            } => {
                write_i32(*quick_index, writer);
                write_u32(*request_id, writer);
            }
            ClientMessage::Drop {
                global_index,
                count,
                request_id,
            } => {
                write_i32(*global_index, writer);
                write_i32(*count, writer);
                write_u32(*request_id, writer);
            }
            ClientMessage::SelectQuickSlot { index } => {
                write_i32(*index, writer);
            }
            ClientMessage::FullResync => {}
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match read_tag::<3>(reader)? {
            0 => Ok(ClientMessage::OpenContainer {
                id: ContainerId::de(reader)?,
            }),
            1 => Ok(ClientMessage::CloseContainer {
                id: ContainerId::de(reader)?,
            }),
            2 => Ok(ClientMessage::Transfer {
                from: ContainerId::de(reader)?,
                from_index: read_i32(reader)?,
                to: ContainerId::de(reader)?,
                to_index: read_i32(reader)?,
                amount: read_i32(reader)?,
                request_id: read_u32(reader)?,
            }),
            3 => Ok(ClientMessage::Pickup {
                item_id: read_string(reader)?,
                amount: read_u32(reader)?,
                ammo: read_u32(reader)?,
                request_id: read_u32(reader)?,
            }),
            4 => Ok(ClientMessage::Reload {
                quick_index: read_i32(reader)?,
                request_id: read_u32(reader)?,
            }),
            5 => Ok(ClientMessage::Drop {
                global_index: read_i32(reader)?,
                count: read_i32(reader)?,
                request_id: read_u32(reader)?,
            }),
            6 => Ok(ClientMessage::SelectQuickSlot {
                index: read_i32(reader)?,
            }),
            7 => Ok(ClientMessage::FullResync),
            _ => Err(SerdeErr),
        }
    }

    fn bit_length(&self) -> u32 {
        let body = match self {
            ClientMessage::OpenContainer { id } | ClientMessage::CloseContainer { id } => {
                id.bit_length()
            }
            ClientMessage::Transfer {
                from,
                from_index,
                to,
                to_index,
                amount,
                request_id,
            } => {
                from.bit_length()
                    + i32_bit_length(*from_index)
                    + to.bit_length()
                    + i32_bit_length(*to_index)
                    + i32_bit_length(*amount)
                    + u32_bit_length(*request_id)
            }
            ClientMessage::Pickup {
                item_id,
                amount,
                ammo,
                request_id,
            } => {
                item_id.bit_length()
                    + u32_bit_length(*amount)
                    + u32_bit_length(*ammo)
                    + u32_bit_length(*request_id)
            }
            ClientMessage::Reload {
                quick_index,
                request_id,
            } => i32_bit_length(*quick_index) + u32_bit_length(*request_id),
            ClientMessage::Drop {
                global_index,
                count,
                request_id,
            } => i32_bit_length(*global_index) + i32_bit_length(*count) + u32_bit_length(*request_id),
            ClientMessage::SelectQuickSlot { index } => i32_bit_length(*index),
            ClientMessage::FullResync => 0,
        };
        tag_bit_length::<3>() + body
    }
}
