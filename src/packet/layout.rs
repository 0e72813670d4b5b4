//! Wire layout of a radio packet.
//!
//! ```text
//! offset  0      1          5          9                        28
//!         ┌──────┬──────────┬──────────┬─────────────────────────┐
//!         │ tag  │ time     │ serial   │ payload (type-specific) │
//!         │ u8   │ i32 LE   │ i32 LE   │                         │
//!         └──────┴──────────┴──────────┴─────────────────────────┘
//! ```
//!
//! | Type          | 9..       | length byte | name / data |
//! |---------------|-----------|-------------|-------------|
//! | `Number`      | i32       | -           | -           |
//! | `Value`       | i32       | 13          | 14..=25     |
//! | `String`      | -         | 9           | 10..=27     |
//! | `Buffer`      | -         | 9           | 10..=27     |
//! | `Double`      | f64       | -           | -           |
//! | `DoubleValue` | f64       | 17          | 18..=25     |

/// Every packet occupies exactly this many bytes on the wire.
pub const PACKET_SIZE: usize = 28;

/// Offset of the type tag.
pub const TYPE_OFFSET: usize = 0;
/// Offset of the sender's running time (i32 LE).
pub const TIME_OFFSET: usize = 1;
/// Offset of the sender's serial number (i32 LE).
pub const SERIAL_OFFSET: usize = 5;
/// Length of the common header; payloads start here.
pub const PACKET_PREFIX_LENGTH: usize = 9;

/// Room left after the header for a standalone payload (length byte included).
pub const MAX_PAYLOAD_LENGTH: usize = PACKET_SIZE - PACKET_PREFIX_LENGTH;
/// Longest string or buffer carried by `String`/`Buffer` packets.
pub const MAX_STRING_LENGTH: usize = MAX_PAYLOAD_LENGTH - 1;
/// Longest name carried by a `Value` packet.
pub const MAX_FIELD_NAME_LENGTH: usize = 12;
/// Longest name carried by a `DoubleValue` packet.
pub const MAX_FIELD_DOUBLE_NAME_LENGTH: usize = 8;

/// Length byte of the name in a `Value` packet.
pub const VALUE_PACKET_NAME_LEN_OFFSET: usize = 13;
/// Length byte of the name in a `DoubleValue` packet.
pub const DOUBLE_VALUE_PACKET_NAME_LEN_OFFSET: usize = 17;

/// Packet type tag stored in byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    /// i32 at 9..=12.
    Number = 0,
    /// i32 at 9..=12, name length at 13, name at 14..
    Value = 1,
    /// length at 9, UTF-8 text at 10..
    String = 2,
    /// length at 9, raw bytes at 10..
    Buffer = 3,
    /// f64 at 9..=16.
    Double = 4,
    /// f64 at 9..=16, name length at 17, name at 18..
    DoubleValue = 5,
}

impl PacketType {
    pub const ALL: [PacketType; 6] = [
        Self::Number,
        Self::Value,
        Self::String,
        Self::Buffer,
        Self::Double,
        Self::DoubleValue,
    ];

    /// Map a raw tag byte to a known packet type.
    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Number),
            1 => Some(Self::Value),
            2 => Some(Self::String),
            3 => Some(Self::Buffer),
            4 => Some(Self::Double),
            5 => Some(Self::DoubleValue),
            _ => None,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// `true` for every type that carries a numeric payload.
    pub const fn has_number(self) -> bool {
        matches!(
            self,
            Self::Number | Self::Double | Self::Value | Self::DoubleValue
        )
    }

    /// `true` for every type that carries a string or name payload.
    pub const fn has_string(self) -> bool {
        matches!(self, Self::String | Self::Value | Self::DoubleValue)
    }

    /// The number is stored as a 64-bit float rather than a 32-bit integer.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Double | Self::DoubleValue)
    }

    /// Offset of the length byte for the string/name slot, if any.
    pub const fn string_offset(self) -> Option<usize> {
        match self {
            Self::String => Some(PACKET_PREFIX_LENGTH),
            Self::Value => Some(VALUE_PACKET_NAME_LEN_OFFSET),
            Self::DoubleValue => Some(DOUBLE_VALUE_PACKET_NAME_LEN_OFFSET),
            Self::Number | Self::Buffer | Self::Double => None,
        }
    }

    /// Capacity of the string/name slot, if any.
    pub const fn max_string_length(self) -> Option<usize> {
        match self {
            Self::String => Some(MAX_STRING_LENGTH),
            Self::Value => Some(MAX_FIELD_NAME_LENGTH),
            Self::DoubleValue => Some(MAX_FIELD_DOUBLE_NAME_LENGTH),
            Self::Number | Self::Buffer | Self::Double => None,
        }
    }
}

impl core::fmt::Display for PacketType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::Value => "value",
            Self::String => "string",
            Self::Buffer => "buffer",
            Self::Double => "double",
            Self::DoubleValue => "double-value",
        };
        f.write_str(name)
    }
}
