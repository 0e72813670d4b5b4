//! Inbound packet records handed to handlers and kept as the last packet.

use crate::packet::RadioPacket;

/// A decoded packet together with its reception metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedPacket {
    pub packet: RadioPacket,
    /// Received signal strength in dBm.
    pub signal: i32,
}

impl ReceivedPacket {
    /// Integer property of the packet.
    pub fn property(&self, property: PacketProperty) -> i32 {
        match property {
            PacketProperty::Time => self.packet.time,
            PacketProperty::SerialNumber => self.packet.serial,
            PacketProperty::SignalStrength => self.signal,
        }
    }
}

/// Header fields that can be queried on the last received packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketProperty {
    Time = 0,
    SerialNumber = 1,
    SignalStrength = 2,
}

impl PacketProperty {
    pub const fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Time),
            1 => Some(Self::SerialNumber),
            2 => Some(Self::SignalStrength),
            _ => None,
        }
    }
}
