//! Log-based adapters.
//!
//! [`LogPacketHandler`] writes every received packet to the logger (which
//! goes to UART / USB-CDC in production).  [`LogSerialPort`] stands in for
//! the serial console on the host by forwarding complete lines to the
//! logger.

use log::info;

use crate::app::events::ReceivedPacket;
use crate::app::ports::{PacketHandler, SerialPort};
use crate::packet::Payload;

/// Handler that logs every packet it is given.
pub struct LogPacketHandler;

impl LogPacketHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogPacketHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketHandler for LogPacketHandler {
    fn on_packet(&mut self, received: &ReceivedPacket) {
        let p = &received.packet;
        let (t, s, rssi) = (p.time, p.serial, received.signal);
        match &p.payload {
            Payload::Number(v) => info!("RX | t={} s={} rssi={} | number={}", t, s, rssi, v),
            Payload::Double(v) => info!("RX | t={} s={} rssi={} | number={}", t, s, rssi, v),
            Payload::Value { name, value } => {
                info!("RX | t={} s={} rssi={} | {}={}", t, s, rssi, name, value);
            }
            Payload::DoubleValue { name, value } => {
                info!("RX | t={} s={} rssi={} | {}={}", t, s, rssi, name, value);
            }
            Payload::String(text) => {
                info!("RX | t={} s={} rssi={} | string={:?}", t, s, rssi, text.as_str());
            }
            Payload::Buffer(b) => {
                info!("RX | t={} s={} rssi={} | buffer={:02x?}", t, s, rssi, b.as_slice());
            }
            Payload::Unknown(tag) => {
                info!("RX | t={} s={} rssi={} | unknown type {}", t, s, rssi, tag);
            }
        }
    }
}

/// Longest line [`LogSerialPort`] will assemble.
pub const SERIAL_LINE_CAP: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// The pending line exceeded [`SERIAL_LINE_CAP`] bytes and was discarded.
    LineTooLong,
}

/// Serial console that emits each `\n`-terminated line through `log`.
pub struct LogSerialPort {
    line: heapless::String<SERIAL_LINE_CAP>,
    lines_written: u32,
}

impl LogSerialPort {
    pub fn new() -> Self {
        Self {
            line: heapless::String::new(),
            lines_written: 0,
        }
    }

    pub fn lines_written(&self) -> u32 {
        self.lines_written
    }
}

impl Default for LogSerialPort {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialPort for LogSerialPort {
    type Error = SerialError;

    fn write_str(&mut self, s: &str) -> Result<(), SerialError> {
        for ch in s.chars() {
            if ch == '\n' {
                info!("SERIAL | {}", self.line.trim_end_matches('\r'));
                self.line.clear();
                self.lines_written += 1;
            } else if self.line.push(ch).is_err() {
                self.line.clear();
                return Err(SerialError::LineTooLong);
            }
        }
        Ok(())
    }
}
