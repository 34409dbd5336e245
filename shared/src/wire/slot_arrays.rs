use naia_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    error::WireError,
    wire::{
        len_bit_length, read_len, read_string, read_u32_array, u32_array_bit_length, write_len,
        write_u32_array,
    },
    ItemState, Slot,
};

/// Slots flattened into parallel arrays.
///
/// An empty slot is written as an empty id with a zero count. When decoding,
/// an empty id or a zero count yields a cleared slot, and a slot whose ammo
/// and durability are both zero carries no [`ItemState`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotArrays {
    pub item_ids: Vec<String>,
    pub counts: Vec<u32>,
    pub ammo: Vec<u32>,
    pub durability: Vec<u32>,
}

impl SlotArrays {
    pub fn from_slots<'a>(slots: impl IntoIterator<Item = &'a Slot>) -> Self {
        let mut arrays = Self::default();
        for slot in slots {
            arrays.push(slot);
        }
        arrays
    }

    pub fn push(&mut self, slot: &Slot) {
        if slot.is_empty() {
            self.item_ids.push(String::new());
            self.counts.push(0);
            self.ammo.push(0);
            self.durability.push(0);
            return;
        }
        let state = slot.state().copied().unwrap_or_default();
        self.item_ids
            .push(slot.item_id().map(str::to_string).unwrap_or_default());
        self.counts.push(slot.count());
        self.ammo.push(state.ammo);
        self.durability.push(state.durability);
    }

    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }

    /// Checks that every array holds exactly `expected` entries.
    pub fn check_len(&self, message: &'static str, expected: usize) -> Result<(), WireError> {
        for found in [
            self.item_ids.len(),
            self.counts.len(),
            self.ammo.len(),
            self.durability.len(),
        ] {
            if found != expected {
                return Err(WireError::LengthMismatch {
                    message,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Decodes entry `index`. Callers check lengths first.
    fn slot(&self, index: usize) -> Slot {
        let item_id = &self.item_ids[index];
        let count = self.counts[index];
        if item_id.is_empty() || count == 0 {
            return Slot::empty();
        }
        let state = ItemState::new(self.ammo[index], self.durability[index]);
        Slot::with_state(item_id.clone(), count, state)
    }

    pub fn to_slots(&self, message: &'static str) -> Result<Vec<Slot>, WireError> {
        self.check_len(message, self.len())?;
        Ok((0..self.len()).map(|index| self.slot(index)).collect())
    }
}

impl Serde for SlotArrays {
    fn ser(&self, writer: &mut dyn BitWrite) {
        write_len(self.item_ids.len(), writer);
        for item_id in &self.item_ids {
            item_id.ser(writer);
        }
        write_u32_array(&self.counts, writer);
        write_u32_array(&self.ammo, writer);
        write_u32_array(&self.durability, writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let len = read_len(reader)?;
        let mut item_ids = Vec::with_capacity(len);
        for _ in 0..len {
            item_ids.push(read_string(reader)?);
        }
        let counts = read_u32_array(reader)?;
        let ammo = read_u32_array(reader)?;
        let durability = read_u32_array(reader)?;
        Ok(Self {
            item_ids,
            counts,
            ammo,
            durability,
        })
    }

    fn bit_length(&self) -> u32 {
        len_bit_length(self.item_ids.len())
            + self
                .item_ids
                .iter()
                .map(|item_id| item_id.bit_length())
                .sum::<u32>()
            + u32_array_bit_length(&self.counts)
            + u32_array_bit_length(&self.ammo)
            + u32_array_bit_length(&self.durability)
    }
}
