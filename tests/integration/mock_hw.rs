//! Mock radio, device and serial adapters for integration tests.
//!
//! Records every transmitted frame and every serial write so tests can
//! assert on the full history without touching real hardware.

use radiopacket::PACKET_SIZE;
use radiopacket::app::events::ReceivedPacket;
use radiopacket::app::ports::{DeviceInfo, InboundFrame, PacketHandler, RadioTransport, SerialPort};
use std::collections::VecDeque;

// ── MockRadio ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRadio {
    pub sent: Vec<[u8; PACKET_SIZE]>,
    pub inbound: VecDeque<InboundFrame>,
}

#[allow(dead_code)]
impl MockRadio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame as if it had been received with `rssi`.
    pub fn deliver(&mut self, bytes: &[u8], rssi: i32) {
        self.inbound.push_back(InboundFrame::new(bytes, rssi));
    }

    /// Move everything sent so far into the inbound queue.
    pub fn echo(&mut self, rssi: i32) {
        for frame in self.sent.drain(..) {
            self.inbound.push_back(InboundFrame::new(&frame, rssi));
        }
    }
}

impl RadioTransport for MockRadio {
    type Error = ();

    fn send_raw(&mut self, frame: &[u8; PACKET_SIZE]) -> Result<(), ()> {
        self.sent.push(*frame);
        Ok(())
    }

    fn receive_raw(&mut self) -> Option<InboundFrame> {
        self.inbound.pop_front()
    }
}

// ── MockDevice ────────────────────────────────────────────────

pub struct MockDevice {
    pub time_ms: i32,
    pub serial: i32,
}

impl DeviceInfo for MockDevice {
    fn running_time_ms(&self) -> i32 {
        self.time_ms
    }

    fn serial_number(&self) -> i32 {
        self.serial
    }
}

// ── MockSerial ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockSerial {
    pub out: String,
}

impl SerialPort for MockSerial {
    type Error = ();

    fn write_str(&mut self, s: &str) -> Result<(), ()> {
        self.out.push_str(s);
        Ok(())
    }
}

// ── Recording handler ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    Packet { time: i32, serial: i32, signal: i32 },
    Number(f64),
    Value(String, f64),
    Text(String),
    Buffer(Vec<u8>),
}

#[derive(Default)]
pub struct RecordingHandler {
    pub calls: Vec<Callback>,
}

impl PacketHandler for RecordingHandler {
    fn on_packet(&mut self, received: &ReceivedPacket) {
        self.calls.push(Callback::Packet {
            time: received.packet.time,
            serial: received.packet.serial,
            signal: received.signal,
        });
    }

    fn on_number(&mut self, value: f64) {
        self.calls.push(Callback::Number(value));
    }

    fn on_value(&mut self, name: &str, value: f64) {
        self.calls.push(Callback::Value(name.to_owned(), value));
    }

    fn on_string(&mut self, text: &str) {
        self.calls.push(Callback::Text(text.to_owned()));
    }

    fn on_buffer(&mut self, bytes: &[u8]) {
        self.calls.push(Callback::Buffer(bytes.to_vec()));
    }
}
