//! JSON rendering of a packet for the serial console.
//!
//! One object per packet with keys in the order `t, s, n, b, v`:
//!
//! | Key | Present when        | Value                          |
//! |-----|---------------------|--------------------------------|
//! | `t` | always              | sender time                    |
//! | `s` | always              | sender serial (0 if not sent)  |
//! | `n` | type has a string   | string payload or value name   |
//! | `b` | `Buffer` packets    | payload as lowercase hex       |
//! | `v` | type has a number   | integer or float payload       |
//!
//! Absent keys are omitted, never `null`.

extern crate alloc;
use alloc::string::String;
use core::fmt::Write;

use serde::Serialize;

use crate::app::ports::SerialPort;
use crate::error::{Error, Result};
use crate::packet::layout::MAX_STRING_LENGTH;
use crate::packet::{Number, RadioPacket};

/// Hex text of a buffer payload, two digits per byte.
pub type HexString = heapless::String<{ 2 * MAX_STRING_LENGTH }>;

/// Lowercase hex of at most [`MAX_STRING_LENGTH`] bytes; longer input is
/// cut off at the capacity.
pub fn hex(bytes: &[u8]) -> HexString {
    let mut out = HexString::new();
    for b in bytes.iter().take(MAX_STRING_LENGTH) {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Borrowed serialisable view of a packet.
#[derive(Debug, Serialize)]
pub struct PacketJson<'a> {
    t: i32,
    s: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    b: Option<HexString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    v: Option<Number>,
}

impl<'a> From<&'a RadioPacket> for PacketJson<'a> {
    fn from(p: &'a RadioPacket) -> Self {
        Self {
            t: p.time,
            s: p.serial,
            n: if p.has_string() { p.string_payload() } else { None },
            b: p.buffer_payload().map(hex),
            v: if p.has_number() { p.number_payload() } else { None },
        }
    }
}

pub fn to_json(packet: &RadioPacket) -> serde_json::Result<String> {
    serde_json::to_string(&PacketJson::from(packet))
}

/// Write `packet` as one JSON line to the serial console.
pub fn write_json_line<P: SerialPort>(
    packet: &RadioPacket,
    port: &mut P,
    line_ending: &str,
) -> Result<()> {
    let json = to_json(packet).map_err(|_| Error::Serial)?;
    port.write_str(&json)
        .and_then(|()| port.write_str(line_ending))
        .map_err(|e| {
            log::warn!("serial write failed: {:?}", e);
            Error::Serial
        })
}
