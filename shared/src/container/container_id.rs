use std::fmt;

use naia_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr, UnsignedInteger};

use crate::{ObjectRef, PlayerRef};

/// The variant of a container. Two identities with a different kind are
/// never equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerKind {
    PlayerQuick,
    PlayerMain,
    Chest,
    Corpse,
    Custom,
}

impl ContainerKind {
    /// Player containers are keyed by their owner, world containers by their
    /// object.
    pub fn is_player_owned(&self) -> bool {
        matches!(self, ContainerKind::PlayerQuick | ContainerKind::PlayerMain)
    }

    fn to_index(self) -> u8 {
        match self {
            ContainerKind::PlayerQuick => 0,
            ContainerKind::PlayerMain => 1,
            ContainerKind::Chest => 2,
            ContainerKind::Corpse => 3,
            ContainerKind::Custom => 4,
        }
    }

    fn from_index(index: i128) -> Option<Self> {
        match index {
            0 => Some(ContainerKind::PlayerQuick),
            1 => Some(ContainerKind::PlayerMain),
            2 => Some(ContainerKind::Chest),
            3 => Some(ContainerKind::Corpse),
            4 => Some(ContainerKind::Custom),
            _ => None,
        }
    }
}

impl Serde for ContainerKind {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedInteger::<3>::new(self.to_index()).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        // malformed packets may carry an unknown index, never panic on it
        ContainerKind::from_index(UnsignedInteger::<3>::de(reader)?.get()).ok_or(SerdeErr)
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for ContainerKind {
    fn const_bit_length() -> u32 {
        <UnsignedInteger<3> as ConstBitLength>::const_bit_length()
    }
}

/// Identity of a container: `(kind, owner, object)`, compared on all three
/// fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId {
    pub kind: ContainerKind,
    pub owner: PlayerRef,
    pub object: ObjectRef,
}

impl ContainerId {
    pub fn new(kind: ContainerKind, owner: PlayerRef, object: ObjectRef) -> Self {
        Self {
            kind,
            owner,
            object,
        }
    }

    pub fn player_quick(owner: PlayerRef) -> Self {
        Self::new(ContainerKind::PlayerQuick, owner, ObjectRef::NONE)
    }

    pub fn player_main(owner: PlayerRef) -> Self {
        Self::new(ContainerKind::PlayerMain, owner, ObjectRef::NONE)
    }

    /// Identity of a world container (chest, corpse, ...), keyed by object.
    pub fn of_object(kind: ContainerKind, object: ObjectRef) -> Self {
        Self::new(kind, PlayerRef::NONE, object)
    }

    /// Canonical form of an identity received from `viewer`.
    ///
    /// Player containers with no owner default to the viewer and drop their
    /// object ref. Corpses drop their owner, since they are keyed by object.
    pub fn normalized_for(&self, viewer: PlayerRef) -> Self {
        let mut id = *self;
        match id.kind {
            ContainerKind::PlayerQuick | ContainerKind::PlayerMain => {
                if id.owner.is_none() {
                    id.owner = viewer;
                }
                id.object = ObjectRef::NONE;
            }
            ContainerKind::Corpse => {
                id.owner = PlayerRef::NONE;
            }
            ContainerKind::Chest | ContainerKind::Custom => {}
        }
        id
    }

    /// Loose match used when only part of an identity is known: same kind,
    /// plus either a non-default object ref or a non-default owner in common.
    pub fn loosely_matches(&self, partial: &ContainerId) -> bool {
        if self.kind != partial.kind {
            return false;
        }
        if !partial.object.is_none() && self.object == partial.object {
            return true;
        }
        !partial.owner.is_none() && self.owner == partial.owner
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({}/{})",
            self.kind,
            self.owner.raw(),
            self.object.raw()
        )
    }
}

impl Serde for ContainerId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.kind.ser(writer);
        self.owner.ser(writer);
        self.object.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let kind = ContainerKind::de(reader)?;
        let owner = PlayerRef::de(reader)?;
        let object = ObjectRef::de(reader)?;
        Ok(Self::new(kind, owner, object))
    }

    fn bit_length(&self) -> u32 {
        self.kind.bit_length() + self.owner.bit_length() + self.object.bit_length()
    }
}
