//! Buffer-backed packet view.
//!
//! [`RawPacket`] owns the 28 wire bytes and interprets them according to
//! the tag in byte 0.  Mutators are no-ops for tags that have no slot for
//! the value; accessors return `None`.  Nothing here can fail: oversize
//! strings and buffers are truncated, mismatched accessors read as absent.

use crate::error::FrameError;

use super::layout::{
    MAX_STRING_LENGTH, PACKET_PREFIX_LENGTH, PACKET_SIZE, PacketType, SERIAL_OFFSET, TIME_OFFSET,
    TYPE_OFFSET,
};
use super::payload::{Number, truncate_utf8};

/// A single radio packet as it travels over the air.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawPacket {
    data: [u8; PACKET_SIZE],
}

impl RawPacket {
    /// Allocate a zeroed packet carrying `packet_type` in byte 0.
    pub fn mk_packet(packet_type: PacketType) -> Self {
        let mut data = [0u8; PACKET_SIZE];
        data[TYPE_OFFSET] = packet_type.as_u8();
        Self { data }
    }

    /// Wrap bytes received from the transport.
    ///
    /// The bytes are taken as-is; the tag is not checked.  Integrity of the
    /// frame is the transport's responsibility.
    pub const fn get_packet(data: [u8; PACKET_SIZE]) -> Self {
        Self { data }
    }

    /// Wrap a frame of unknown length, rejecting anything that is not
    /// exactly [`PACKET_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FrameError> {
        let data: [u8; PACKET_SIZE] = bytes
            .try_into()
            .map_err(|_| FrameError::WrongLength(bytes.len()))?;
        Ok(Self::get_packet(data))
    }

    pub const fn as_bytes(&self) -> &[u8; PACKET_SIZE] {
        &self.data
    }

    pub const fn into_bytes(self) -> [u8; PACKET_SIZE] {
        self.data
    }

    /// The raw tag byte, including values that are not a known type.
    pub const fn tag(&self) -> u8 {
        self.data[TYPE_OFFSET]
    }

    pub const fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_u8(self.tag())
    }

    // ── Header ────────────────────────────────────────────────

    pub fn time(&self) -> i32 {
        self.read_i32(TIME_OFFSET)
    }

    pub fn set_time(&mut self, time: i32) {
        self.write_i32(TIME_OFFSET, time);
    }

    pub fn serial(&self) -> i32 {
        self.read_i32(SERIAL_OFFSET)
    }

    pub fn set_serial(&mut self, serial: i32) {
        self.write_i32(SERIAL_OFFSET, serial);
    }

    // ── Number payload ────────────────────────────────────────

    /// The number carried by `Number`/`Value` (i32) or
    /// `Double`/`DoubleValue` (f64) packets.
    pub fn number_payload(&self) -> Option<Number> {
        let ty = self.packet_type().filter(|t| t.has_number())?;
        if ty.is_float() {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(&self.data[PACKET_PREFIX_LENGTH..PACKET_PREFIX_LENGTH + 8]);
            Some(Number::Float(f64::from_le_bytes(bytes)))
        } else {
            Some(Number::Int(self.read_i32(PACKET_PREFIX_LENGTH)))
        }
    }

    /// Store `value` in the number slot.
    ///
    /// Integer-carrying types store `value as i32` (saturating, NaN as 0).
    /// Ignored for types without a number slot.
    pub fn set_number_payload(&mut self, value: f64) {
        let Some(ty) = self.packet_type().filter(|t| t.has_number()) else {
            return;
        };
        if ty.is_float() {
            self.data[PACKET_PREFIX_LENGTH..PACKET_PREFIX_LENGTH + 8]
                .copy_from_slice(&value.to_le_bytes());
        } else {
            self.write_i32(PACKET_PREFIX_LENGTH, value as i32);
        }
    }

    // ── String / name payload ─────────────────────────────────

    /// The string of a `String` packet or the name of a `Value`/`DoubleValue`
    /// packet.
    ///
    /// The length byte is clamped to the slot capacity.  Bytes that are not
    /// valid UTF-8 end the string early.
    pub fn string_payload(&self) -> Option<&str> {
        let ty = self.packet_type()?;
        let offset = ty.string_offset()?;
        let max = ty.max_string_length()?;
        let bytes = self.slot(offset, max);
        match core::str::from_utf8(bytes) {
            Ok(s) => Some(s),
            Err(e) => Some(core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default()),
        }
    }

    /// Write `value` into the string/name slot, truncated to the slot
    /// capacity on a character boundary.  Ignored for types without a slot.
    pub fn set_string_payload(&mut self, value: &str) {
        let Some(ty) = self.packet_type() else {
            return;
        };
        let (Some(offset), Some(max)) = (ty.string_offset(), ty.max_string_length()) else {
            return;
        };
        let stored = truncate_utf8(value, max).as_bytes();
        self.write_slot(offset, stored);
    }

    // ── Buffer payload ────────────────────────────────────────

    /// The bytes of a `Buffer` packet.
    pub fn buffer_payload(&self) -> Option<&[u8]> {
        if self.packet_type() != Some(PacketType::Buffer) {
            return None;
        }
        Some(self.slot(PACKET_PREFIX_LENGTH, MAX_STRING_LENGTH))
    }

    /// Write at most [`MAX_STRING_LENGTH`] bytes of `value`.  Ignored unless
    /// this is a `Buffer` packet.
    pub fn set_buffer_payload(&mut self, value: &[u8]) {
        if self.packet_type() != Some(PacketType::Buffer) {
            return;
        }
        let len = value.len().min(MAX_STRING_LENGTH);
        self.write_slot(PACKET_PREFIX_LENGTH, &value[..len]);
    }

    // ── Tag membership ────────────────────────────────────────

    pub fn has_string(&self) -> bool {
        self.packet_type().is_some_and(PacketType::has_string)
    }

    pub fn has_number(&self) -> bool {
        self.packet_type().is_some_and(PacketType::has_number)
    }

    // ── Internals ─────────────────────────────────────────────

    fn read_i32(&self, offset: usize) -> i32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[offset..offset + 4]);
        i32::from_le_bytes(bytes)
    }

    fn write_i32(&mut self, offset: usize, value: i32) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Length-prefixed slot starting at `offset`.  Never reads past the
    /// slot capacity or the end of the packet.
    fn slot(&self, offset: usize, max: usize) -> &[u8] {
        let start = offset + 1;
        let len = (self.data[offset] as usize)
            .min(max)
            .min(PACKET_SIZE - start);
        &self.data[start..start + len]
    }

    fn write_slot(&mut self, offset: usize, bytes: &[u8]) {
        let start = offset + 1;
        self.data[offset] = bytes.len() as u8;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
    }
}

impl Default for RawPacket {
    fn default() -> Self {
        Self::mk_packet(PacketType::Number)
    }
}

impl From<[u8; PACKET_SIZE]> for RawPacket {
    fn from(data: [u8; PACKET_SIZE]) -> Self {
        Self::get_packet(data)
    }
}

impl TryFrom<&[u8]> for RawPacket {
    type Error = FrameError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for RawPacket {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl core::fmt::Debug for RawPacket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawPacket")
            .field("tag", &self.tag())
            .field("time", &self.time())
            .field("serial", &self.serial())
            .field("payload", &&self.data[PACKET_PREFIX_LENGTH..])
            .finish()
    }
}
