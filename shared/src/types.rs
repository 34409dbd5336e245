use naia_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

pub type ContainerVersion = u32;
pub type ClientRequestId = u32;

// PlayerRef

/// Opaque handle of a connected player. The zero value means "no player".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerRef(u64);

impl PlayerRef {
    pub const NONE: PlayerRef = PlayerRef(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl Serde for PlayerRef {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let raw = UnsignedVariableInteger::<7>::de(reader)?.get();
        let raw = u64::try_from(raw).map_err(|_| SerdeErr)?;
        Ok(Self(raw))
    }

    fn bit_length(&self) -> u32 {
        UnsignedVariableInteger::<7>::new(self.0).bit_length()
    }
}

// ObjectRef

/// Opaque handle of a spawned world object (chest, corpse, ...). The zero
/// value means "no object".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef(u64);

impl ObjectRef {
    pub const NONE: ObjectRef = ObjectRef(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl Serde for ObjectRef {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let raw = UnsignedVariableInteger::<7>::de(reader)?.get();
        let raw = u64::try_from(raw).map_err(|_| SerdeErr)?;
        Ok(Self(raw))
    }

    fn bit_length(&self) -> u32 {
        UnsignedVariableInteger::<7>::new(self.0).bit_length()
    }
}
