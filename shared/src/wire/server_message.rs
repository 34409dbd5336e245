use naia_serde::{BitReader, BitWrite, FileBitWriter, Serde, SerdeErr};

use crate::{
    error::{InventoryError, WireError},
    wire::{
        read_string, read_tag, read_u32, read_u32_array, tag_bit_length, u32_array_bit_length,
        u32_bit_length, write_tag, write_u32, write_u32_array, SlotArrays,
    },
    ClientRequestId, ContainerDelta, ContainerId, ContainerSnapshot, ContainerVersion, SlotChange,
};

// SnapshotPush

/// Full container state, sent on first view and on resync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotPush {
    pub id: ContainerId,
    pub version: ContainerVersion,
    pub capacity: u32,
    pub slots: SlotArrays,
}

impl SnapshotPush {
    pub fn from_snapshot(snapshot: &ContainerSnapshot) -> Self {
        Self {
            id: snapshot.id,
            version: snapshot.version,
            capacity: snapshot.slots.len() as u32,
            slots: SlotArrays::from_slots(&snapshot.slots),
        }
    }

    pub fn into_snapshot(self) -> Result<ContainerSnapshot, WireError> {
        self.slots.check_len("snapshot", self.capacity as usize)?;
        let slots = self.slots.to_slots("snapshot")?;
        Ok(ContainerSnapshot::new(self.id, self.version, slots))
    }
}

impl Serde for SnapshotPush {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.id.ser(writer);
        write_u32(self.version, writer);
        write_u32(self.capacity, writer);
        self.slots.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            id: ContainerId::de(reader)?,
            version: read_u32(reader)?,
            capacity: read_u32(reader)?,
            slots: SlotArrays::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.id.bit_length()
            + u32_bit_length(self.version)
            + u32_bit_length(self.capacity)
            + self.slots.bit_length()
    }
}

// DeltaPush

/// Changed slots only, one array entry per changed index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaPush {
    pub id: ContainerId,
    pub from_version: ContainerVersion,
    pub to_version: ContainerVersion,
    pub indices: Vec<u32>,
    pub slots: SlotArrays,
}

impl DeltaPush {
    pub fn from_delta(delta: &ContainerDelta) -> Self {
        Self {
            id: delta.id,
            from_version: delta.from_version,
            to_version: delta.to_version,
            indices: delta
                .changes
                .iter()
                .map(|change| change.index as u32)
                .collect(),
            slots: SlotArrays::from_slots(delta.changes.iter().map(|change| &change.slot)),
        }
    }

    pub fn into_delta(self) -> Result<ContainerDelta, WireError> {
        self.slots.check_len("delta", self.indices.len())?;
        let slots = self.slots.to_slots("delta")?;
        let changes = self
            .indices
            .iter()
            .zip(slots)
            .map(|(index, slot)| SlotChange::new(*index as usize, slot))
            .collect();
        Ok(ContainerDelta {
            id: self.id,
            from_version: self.from_version,
            to_version: self.to_version,
            changes,
        })
    }
}

impl Serde for DeltaPush {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.id.ser(writer);
        write_u32(self.from_version, writer);
        write_u32(self.to_version, writer);
        write_u32_array(&self.indices, writer);
        self.slots.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            id: ContainerId::de(reader)?,
            from_version: read_u32(reader)?,
            to_version: read_u32(reader)?,
            indices: read_u32_array(reader)?,
            slots: SlotArrays::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.id.bit_length()
            + u32_bit_length(self.from_version)
            + u32_bit_length(self.to_version)
            + u32_array_bit_length(&self.indices)
            + self.slots.bit_length()
    }
}

// AckMessage

/// Outcome of an acknowledged request. `message` holds the reason code on
/// failure and may hold a note on success.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AckMessage {
    pub request_id: ClientRequestId,
    pub ok: bool,
    pub message: String,
}

impl AckMessage {
    pub fn ok(request_id: ClientRequestId) -> Self {
        Self {
            request_id,
            ok: true,
            message: String::new(),
        }
    }

    pub fn refused(request_id: ClientRequestId, error: InventoryError) -> Self {
        Self {
            request_id,
            ok: false,
            message: error.reason().to_string(),
        }
    }

    pub fn from_result(request_id: ClientRequestId, result: Result<(), InventoryError>) -> Self {
        match result {
            Ok(()) => Self::ok(request_id),
            Err(error) => Self::refused(request_id, error),
        }
    }
}

impl Serde for AckMessage {
    fn ser(&self, writer: &mut dyn BitWrite) {
        write_u32(self.request_id, writer);
        self.ok.ser(writer);
        self.message.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            request_id: read_u32(reader)?,
            ok: bool::de(reader)?,
            message: read_string(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        u32_bit_length(self.request_id) + self.ok.bit_length() + self.message.bit_length()
    }
}

// ServerMessage

/// Pushes and acknowledgements sent by the inventory server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerMessage {
    Snapshot(SnapshotPush),
    Delta(DeltaPush),
    Ack(AckMessage),
}

impl ServerMessage {
    pub fn snapshot(snapshot: &ContainerSnapshot) -> Self {
        ServerMessage::Snapshot(SnapshotPush::from_snapshot(snapshot))
    }

    pub fn delta(delta: &ContainerDelta) -> Self {
        ServerMessage::Delta(DeltaPush::from_delta(delta))
    }

    pub fn to_bytes(&self) -> Box<[u8]> {
        let mut writer = FileBitWriter::new();
        self.ser(&mut writer);
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let mut reader = BitReader::new(bytes);
        Self::de(&mut reader).map_err(|_| WireError::Malformed { message: "server" })
    }
}

impl Serde for ServerMessage {
    fn ser(&self, writer: &mut dyn BitWrite) {
        match self {
            ServerMessage::Snapshot(push) => {
                write_tag::<2>(0, writer);
                push.ser(writer);
            }
            ServerMessage::Delta(push) => {
                write_tag::<2>(1, writer);
                push.ser(writer);
            }
            ServerMessage::Ack(ack) => {
                write_tag::<2>(2, writer);
                ack.ser(writer);
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match read_tag::<2>(reader)? {
            0 => Ok(ServerMessage::Snapshot(SnapshotPush::de(reader)?)),
            1 => Ok(ServerMessage::Delta(DeltaPush::de(reader)?)),
            2 => Ok(ServerMessage::Ack(AckMessage::de(reader)?)),
            _ => Err(SerdeErr),
        }
    }

    fn bit_length(&self) -> u32 {
        tag_bit_length::<2>()
            + match self {
                ServerMessage::Snapshot(push) => push.bit_length(),
                ServerMessage::Delta(push) => push.bit_length(),
                ServerMessage::Ack(ack) => ack.bit_length(),
            }
    }
}
