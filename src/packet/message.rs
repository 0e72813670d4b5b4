//! A decoded packet: sender header plus typed payload.

use crate::error::FrameError;

use super::layout::{PACKET_SIZE, PacketType};
use super::payload::{Number, Payload};
use super::raw::RawPacket;

/// One radio message, header and payload.
///
/// `time` and `serial` are zero until the sending side stamps them; see
/// [`RadioService`](crate::app::service::RadioService).
#[derive(Debug, Clone, PartialEq)]
pub struct RadioPacket {
    /// Sender's running time in milliseconds.
    pub time: i32,
    /// Sender's serial number, 0 when not transmitted.
    pub serial: i32,
    pub payload: Payload,
}

impl RadioPacket {
    pub fn new(payload: Payload) -> Self {
        Self {
            time: 0,
            serial: 0,
            payload,
        }
    }

    /// Bare number, shape chosen from the value.
    pub fn number(value: f64) -> Self {
        Self::new(Payload::number(value))
    }

    /// Named number, shape chosen from the value, name truncated.
    pub fn value(name: &str, value: f64) -> Self {
        Self::new(Payload::value(name, value))
    }

    pub fn string(text: &str) -> Self {
        Self::new(Payload::string(text))
    }

    pub fn buffer(bytes: &[u8]) -> Self {
        Self::new(Payload::buffer(bytes))
    }

    /// Set the sender header.
    pub fn stamp(&mut self, time: i32, serial: i32) {
        self.time = time;
        self.serial = serial;
    }

    pub fn encode(&self) -> RawPacket {
        let mut raw = self.payload.to_raw();
        raw.set_time(self.time);
        raw.set_serial(self.serial);
        raw
    }

    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        self.encode().into_bytes()
    }

    pub fn decode(raw: &RawPacket) -> Self {
        Self {
            time: raw.time(),
            serial: raw.serial(),
            payload: Payload::from_raw(raw),
        }
    }

    pub fn from_bytes(bytes: &[u8; PACKET_SIZE]) -> Self {
        Self::decode(&RawPacket::get_packet(*bytes))
    }

    pub fn packet_type(&self) -> Option<PacketType> {
        self.payload.packet_type()
    }

    pub fn number_payload(&self) -> Option<Number> {
        self.payload.number_value()
    }

    pub fn string_payload(&self) -> Option<&str> {
        self.payload.text()
    }

    pub fn buffer_payload(&self) -> Option<&[u8]> {
        self.payload.bytes()
    }

    pub fn has_number(&self) -> bool {
        self.payload.has_number()
    }

    pub fn has_string(&self) -> bool {
        self.payload.has_string()
    }
}

impl From<&RawPacket> for RadioPacket {
    fn from(raw: &RawPacket) -> Self {
        Self::decode(raw)
    }
}

impl From<&RadioPacket> for RawPacket {
    fn from(packet: &RadioPacket) -> Self {
        packet.encode()
    }
}

impl TryFrom<&[u8]> for RadioPacket {
    type Error = FrameError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        RawPacket::from_slice(bytes).map(|raw| Self::decode(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_survives_every_type() {
        let payloads = [
            Payload::number(1.0),
            Payload::value("n", 1.0),
            Payload::string("s"),
            Payload::buffer(&[1]),
            Payload::number(1.5),
            Payload::value("n", 1.5),
        ];
        for payload in payloads {
            let mut p = RadioPacket::new(payload);
            p.stamp(12345, 42);
            let back = RadioPacket::from_bytes(&p.to_bytes());
            assert_eq!((back.time, back.serial), (12345, 42));
        }
    }

    #[test]
    fn named_value_end_to_end() {
        let p = RadioPacket::value("temp", 23.0);
        assert_eq!(p.packet_type(), Some(PacketType::Value));
        let back = RadioPacket::from_bytes(&p.to_bytes());
        assert_eq!(back.number_payload(), Some(Number::Int(23)));
        assert_eq!(back.string_payload(), Some("temp"));
        assert!(back.has_number() && back.has_string());
    }

    #[test]
    fn encoded_size_is_fixed() {
        for p in [
            RadioPacket::number(0.0),
            RadioPacket::string(""),
            RadioPacket::string("a string that is far too long to fit"),
            RadioPacket::buffer(&[0u8; 64]),
        ] {
            assert_eq!(p.to_bytes().len(), PACKET_SIZE);
            assert_eq!(p.encode().as_ref().len(), PACKET_SIZE);
        }
    }

    #[test]
    fn decode_from_slice_checks_length() {
        assert_eq!(
            RadioPacket::try_from(&[0u8; 10][..]),
            Err(FrameError::WrongLength(10))
        );
        let p = RadioPacket::try_from(&RadioPacket::number(7.0).to_bytes()[..]);
        assert_eq!(p.map(|p| p.payload), Ok(Payload::Number(7)));
    }
}
