//! Port traits: the boundary between the packet service and the device.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RadioService ──▶ codec
//! ```
//!
//! The radio transport only moves opaque frames; it knows nothing about
//! packet layout.  Channel selection, retransmission and link-level
//! queueing all live behind [`RadioTransport`].

use super::events::ReceivedPacket;
use crate::packet::PACKET_SIZE;

// ───────────────────────────────────────────────────────────────
// Radio transport (driven adapter: service ↔ radio hardware)
// ───────────────────────────────────────────────────────────────

/// Largest frame a transport may hand over.  Anything other than
/// [`PACKET_SIZE`] bytes is rejected by the service.
pub const MAX_FRAME_LEN: usize = 32;

/// A frame taken off the air.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundFrame {
    pub bytes: heapless::Vec<u8, MAX_FRAME_LEN>,
    /// Received signal strength in dBm.
    pub rssi: i32,
}

impl InboundFrame {
    /// Build a frame, keeping at most [`MAX_FRAME_LEN`] bytes.
    pub fn new(bytes: &[u8], rssi: i32) -> Self {
        let mut buf = heapless::Vec::new();
        let _ = buf.extend_from_slice(&bytes[..bytes.len().min(MAX_FRAME_LEN)]);
        Self { bytes: buf, rssi }
    }
}

/// Raw send/receive primitive of the radio.
pub trait RadioTransport {
    type Error: core::fmt::Debug;

    /// Hand a complete packet to the radio.  Fire-and-forget: `Ok` means the
    /// radio accepted the frame, not that anyone received it.
    fn send_raw(&mut self, frame: &[u8; PACKET_SIZE]) -> Result<(), Self::Error>;

    /// Take the next queued inbound frame, or `None` if nothing is pending.
    fn receive_raw(&mut self) -> Option<InboundFrame>;
}

// ───────────────────────────────────────────────────────────────
// Device info (driven adapter: service ← clock / identity)
// ───────────────────────────────────────────────────────────────

/// Environment queries used to stamp outbound packets.
pub trait DeviceInfo {
    /// Milliseconds since boot, wrapping at the i32 range.
    fn running_time_ms(&self) -> i32;

    /// This device's serial number.
    fn serial_number(&self) -> i32;
}

// ───────────────────────────────────────────────────────────────
// Serial console (driven adapter: service → UART / USB-CDC)
// ───────────────────────────────────────────────────────────────

pub trait SerialPort {
    type Error: core::fmt::Debug;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error>;
}

// ───────────────────────────────────────────────────────────────
// Packet handler (driving side: service → application callbacks)
// ───────────────────────────────────────────────────────────────

/// Callbacks invoked for each received packet.
///
/// Every method has a no-op default, so a handler implements only what it
/// cares about.  [`on_packet`](Self::on_packet) runs first for every packet;
/// then exactly one payload callback runs according to the packet type.
/// Packets with an unknown tag only reach `on_packet`.
pub trait PacketHandler {
    fn on_packet(&mut self, _packet: &ReceivedPacket) {}

    /// `Number` and `Double` packets.
    fn on_number(&mut self, _value: f64) {}

    /// `Value` and `DoubleValue` packets.
    fn on_value(&mut self, _name: &str, _value: f64) {}

    fn on_string(&mut self, _text: &str) {}

    fn on_buffer(&mut self, _bytes: &[u8]) {}
}

/// Handler that ignores everything.
pub struct NullHandler;

impl PacketHandler for NullHandler {}
