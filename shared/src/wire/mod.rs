//! Flat, transport-agnostic packet shapes exchanged between coffer-server and
//! coffer-client. Every push is a set of parallel primitive arrays, one entry
//! per slot or per changed index.

mod client_message;
mod server_message;
mod slot_arrays;

pub use client_message::ClientMessage;
pub use server_message::{AckMessage, DeltaPush, ServerMessage, SnapshotPush};
pub use slot_arrays::SlotArrays;

use naia_serde::{
    BitReader, BitWrite, ConstBitLength, Serde, SerdeErr, SignedVariableInteger, UnsignedInteger,
    UnsignedVariableInteger,
};

/// Longest array a decoder accepts, one entry per slot or changed index.
pub const MAX_WIRE_LEN: usize = 4096;

/// Longest string a decoder accepts, in bytes.
pub const MAX_WIRE_STRING: usize = 1024;

// Scalars are written as variable length integers, small values dominate.

pub(crate) fn write_u32(value: u32, writer: &mut dyn BitWrite) {
    UnsignedVariableInteger::<7>::new(value).ser(writer);
}

pub(crate) fn read_u32(reader: &mut BitReader) -> Result<u32, SerdeErr> {
    let raw = UnsignedVariableInteger::<7>::de(reader)?.get();
    u32::try_from(raw).map_err(|_| SerdeErr)
}

pub(crate) fn u32_bit_length(value: u32) -> u32 {
    UnsignedVariableInteger::<7>::new(value).bit_length()
}

pub(crate) fn write_i32(value: i32, writer: &mut dyn BitWrite) {
    SignedVariableInteger::<7>::new(value).ser(writer);
}

pub(crate) fn read_i32(reader: &mut BitReader) -> Result<i32, SerdeErr> {
    let raw = SignedVariableInteger::<7>::de(reader)?.get();
    i32::try_from(raw).map_err(|_| SerdeErr)
}

pub(crate) fn i32_bit_length(value: i32) -> u32 {
    SignedVariableInteger::<7>::new(value).bit_length()
}

pub(crate) fn write_u32_array(values: &[u32], writer: &mut dyn BitWrite) {
    write_len(values.len(), writer);
    for value in values {
        write_u32(*value, writer);
    }
}

pub(crate) fn read_u32_array(reader: &mut BitReader) -> Result<Vec<u32>, SerdeErr> {
    let len = read_len(reader)?;
    let mut output = Vec::with_capacity(len);
    for _ in 0..len {
        output.push(read_u32(reader)?);
    }
    Ok(output)
}

pub(crate) fn u32_array_bit_length(values: &[u32]) -> u32 {
    len_bit_length(values.len()) + values.iter().map(|value| u32_bit_length(*value)).sum::<u32>()
}

pub(crate) fn write_len(len: usize, writer: &mut dyn BitWrite) {
    UnsignedVariableInteger::<5>::new(len as u64).ser(writer);
}

pub(crate) fn read_len(reader: &mut BitReader) -> Result<usize, SerdeErr> {
    let raw = UnsignedVariableInteger::<5>::de(reader)?.get();
    match usize::try_from(raw) {
        Ok(len) if len <= MAX_WIRE_LEN => Ok(len),
        _ => Err(SerdeErr),
    }
}

pub(crate) fn len_bit_length(len: usize) -> u32 {
    UnsignedVariableInteger::<5>::new(len as u64).bit_length()
}

// Same layout as naia's `String` impl, with the length checked before any
// bytes are read.
pub(crate) fn read_string(reader: &mut BitReader) -> Result<String, SerdeErr> {
    let raw = UnsignedVariableInteger::<9>::de(reader)?.get();
    let len = match usize::try_from(raw) {
        Ok(len) if len <= MAX_WIRE_STRING => len,
        _ => return Err(SerdeErr),
    };
    let mut bytes = Vec::with_capacity(len);
    for _ in 0..len {
        bytes.push(u8::de(reader)?);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn write_tag<const BITS: u8>(tag: u8, writer: &mut dyn BitWrite) {
    UnsignedInteger::<BITS>::new(tag).ser(writer);
}

pub(crate) fn read_tag<const BITS: u8>(reader: &mut BitReader) -> Result<i128, SerdeErr> {
    Ok(UnsignedInteger::<BITS>::de(reader)?.get())
}

pub(crate) fn tag_bit_length<const BITS: u8>() -> u32 {
    <UnsignedInteger<BITS> as ConstBitLength>::const_bit_length()
}
