//! Typed payloads.
//!
//! [`Payload`] has one variant per [`PacketType`], each holding only the
//! fields that type carries on the wire.  Constructors apply the encoding
//! policy: numbers pick the integer or float shape from the value itself,
//! and strings, names and buffers are silently truncated to their slot.

use serde::{Serialize, Serializer};

use super::layout::{
    MAX_FIELD_DOUBLE_NAME_LENGTH, MAX_FIELD_NAME_LENGTH, MAX_STRING_LENGTH, PACKET_SIZE,
    PacketType, TYPE_OFFSET,
};
use super::raw::RawPacket;

/// Text of a `String` packet.
pub type Text = heapless::String<MAX_STRING_LENGTH>;
/// Name of a `Value` packet.
pub type FieldName = heapless::String<MAX_FIELD_NAME_LENGTH>;
/// Name of a `DoubleValue` packet.
pub type DoubleFieldName = heapless::String<MAX_FIELD_DOUBLE_NAME_LENGTH>;
/// Bytes of a `Buffer` packet.
pub type Bytes = heapless::Vec<u8, MAX_STRING_LENGTH>;

/// A number read from the wire, in the shape it was stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i32),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => f64::from(v),
            Self::Float(v) => v,
        }
    }

    /// Pick the shape for `value`: integer when it survives truncation to
    /// i32 unchanged, float otherwise.
    pub fn from_f64(value: f64) -> Self {
        match as_int32(value) {
            Some(v) => Self::Int(v),
            None => Self::Float(value),
        }
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::from_f64(v)
    }
}

impl core::fmt::Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Int(v) => serializer.serialize_i32(v),
            Self::Float(v) => serializer.serialize_f64(v),
        }
    }
}

/// `Some(i)` when `value` is exactly the 32-bit integer `i`.
///
/// NaN, infinities, fractions and anything outside the i32 range go down
/// the float path.  `-0.0` counts as the integer 0.
pub fn as_int32(value: f64) -> Option<i32> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (in_range && value.trunc() == value).then_some(value as i32)
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a
/// character.
pub fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn bounded<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    let _ = out.push_str(truncate_utf8(s, N));
    out
}

/// The application value carried by a packet.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Number(i32),
    Value { name: FieldName, value: i32 },
    String(Text),
    Buffer(Bytes),
    Double(f64),
    DoubleValue { name: DoubleFieldName, value: f64 },
    /// Tag byte that names no known packet type.  Carries nothing.
    Unknown(u8),
}

impl Payload {
    /// A bare number: `Number` if `value` is an exact i32, else `Double`.
    pub fn number(value: f64) -> Self {
        match Number::from_f64(value) {
            Number::Int(v) => Self::Number(v),
            Number::Float(v) => Self::Double(v),
        }
    }

    /// A name/value pair: `Value` if `value` is an exact i32, else
    /// `DoubleValue`.  The name is truncated to the chosen type's limit.
    pub fn value(name: &str, value: f64) -> Self {
        match Number::from_f64(value) {
            Number::Int(v) => Self::Value {
                name: bounded(name),
                value: v,
            },
            Number::Float(v) => Self::DoubleValue {
                name: bounded(name),
                value: v,
            },
        }
    }

    pub fn string(text: &str) -> Self {
        Self::String(bounded(text))
    }

    pub fn buffer(bytes: &[u8]) -> Self {
        let len = bytes.len().min(MAX_STRING_LENGTH);
        let mut out = Bytes::new();
        let _ = out.extend_from_slice(&bytes[..len]);
        Self::Buffer(out)
    }

    pub fn packet_type(&self) -> Option<PacketType> {
        match self {
            Self::Number(_) => Some(PacketType::Number),
            Self::Value { .. } => Some(PacketType::Value),
            Self::String(_) => Some(PacketType::String),
            Self::Buffer(_) => Some(PacketType::Buffer),
            Self::Double(_) => Some(PacketType::Double),
            Self::DoubleValue { .. } => Some(PacketType::DoubleValue),
            Self::Unknown(_) => None,
        }
    }

    /// The raw tag byte this payload is written with.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Unknown(tag) => *tag,
            other => other.packet_type().map_or(0, PacketType::as_u8),
        }
    }

    pub fn number_value(&self) -> Option<Number> {
        match self {
            Self::Number(v) | Self::Value { value: v, .. } => Some(Number::Int(*v)),
            Self::Double(v) | Self::DoubleValue { value: v, .. } => Some(Number::Float(*v)),
            Self::String(_) | Self::Buffer(_) | Self::Unknown(_) => None,
        }
    }

    /// The string of a `String` payload or the name of a named value.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            Self::Value { name, .. } => Some(name.as_str()),
            Self::DoubleValue { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Buffer(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn has_number(&self) -> bool {
        self.packet_type().is_some_and(PacketType::has_number)
    }

    pub fn has_string(&self) -> bool {
        self.packet_type().is_some_and(PacketType::has_string)
    }

    /// Build the wire form of this payload with a zeroed header.
    pub fn to_raw(&self) -> RawPacket {
        let mut bytes = [0u8; PACKET_SIZE];
        bytes[TYPE_OFFSET] = self.tag();
        let mut raw = RawPacket::get_packet(bytes);
        match self {
            Self::Number(v) | Self::Value { value: v, .. } => raw.set_number_payload(f64::from(*v)),
            Self::Double(v) | Self::DoubleValue { value: v, .. } => raw.set_number_payload(*v),
            Self::String(_) | Self::Buffer(_) | Self::Unknown(_) => {}
        }
        if let Some(text) = self.text() {
            raw.set_string_payload(text);
        }
        if let Some(bytes) = self.bytes() {
            raw.set_buffer_payload(bytes);
        }
        raw
    }

    /// Read the payload out of a wire packet according to its tag.
    pub fn from_raw(raw: &RawPacket) -> Self {
        let Some(ty) = raw.packet_type() else {
            return Self::Unknown(raw.tag());
        };
        let int = || match raw.number_payload() {
            Some(Number::Int(v)) => v,
            _ => 0,
        };
        let float = || raw.number_payload().map_or(0.0, Number::as_f64);
        let text = || raw.string_payload().unwrap_or_default();
        match ty {
            PacketType::Number => Self::Number(int()),
            PacketType::Value => Self::Value {
                name: bounded(text()),
                value: int(),
            },
            PacketType::String => Self::String(bounded(text())),
            PacketType::Buffer => Self::buffer(raw.buffer_payload().unwrap_or_default()),
            PacketType::Double => Self::Double(float()),
            PacketType::DoubleValue => Self::DoubleValue {
                name: bounded(text()),
                value: float(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_take_the_integer_path() {
        assert_eq!(Payload::number(5.0), Payload::Number(5));
        assert_eq!(Payload::number(-0.0), Payload::Number(0));
        assert_eq!(Payload::number(f64::from(i32::MAX)), Payload::Number(i32::MAX));
        assert_eq!(Payload::number(f64::from(i32::MIN)), Payload::Number(i32::MIN));
    }

    #[test]
    fn non_integral_values_take_the_float_path() {
        assert_eq!(Payload::number(5.5), Payload::Double(5.5));
        assert_eq!(Payload::number(2_147_483_648.0), Payload::Double(2_147_483_648.0));
        assert_eq!(Payload::number(f64::INFINITY), Payload::Double(f64::INFINITY));
        assert!(matches!(Payload::number(f64::NAN), Payload::Double(v) if v.is_nan()));
    }

    #[test]
    fn named_value_shape_and_name_limits() {
        let p = Payload::value("abcdefghijklmnop", 3.0);
        assert_eq!(p.packet_type(), Some(PacketType::Value));
        assert_eq!(p.text(), Some("abcdefghijkl"));

        let p = Payload::value("abcdefghijklmnop", 3.5);
        assert_eq!(p.packet_type(), Some(PacketType::DoubleValue));
        assert_eq!(p.text(), Some("abcdefgh"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_utf8("héllo", 2), "h");
        assert_eq!(truncate_utf8("héllo", 3), "hé");
        assert_eq!(truncate_utf8("abc", 10), "abc");
        assert_eq!(truncate_utf8("", 0), "");
    }

    #[test]
    fn buffer_is_capped() {
        let p = Payload::buffer(&[7u8; 30]);
        assert_eq!(p.bytes().map(<[u8]>::len), Some(MAX_STRING_LENGTH));
    }

    #[test]
    fn raw_round_trip_for_every_type() {
        let payloads = [
            Payload::number(-12.0),
            Payload::value("temp", 23.0),
            Payload::string("hello radio"),
            Payload::buffer(&[0, 1, 2, 0xFF]),
            Payload::number(3.25),
            Payload::value("lux", -0.5),
        ];
        for p in payloads {
            assert_eq!(Payload::from_raw(&p.to_raw()), p);
        }
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let mut bytes = [0u8; PACKET_SIZE];
        bytes[TYPE_OFFSET] = 9;
        let p = Payload::from_raw(&RawPacket::get_packet(bytes));
        assert_eq!(p, Payload::Unknown(9));
        assert_eq!(p.tag(), 9);
        assert!(!p.has_number() && !p.has_string());
        assert_eq!(p.to_raw().as_bytes()[0], 9);
    }

    #[test]
    fn number_display() {
        assert_eq!(Number::Int(23).to_string(), "23");
        assert_eq!(Number::Float(5.5).to_string(), "5.5");
    }
}
