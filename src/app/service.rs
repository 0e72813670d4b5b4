//! Radio service: send orchestration and receive dispatch.
//!
//! [`RadioService`] is the only place that stamps outbound packets and the
//! only place that remembers the last inbound packet.  The codec stays
//! stateless; the transport, clock, identity and console are injected per
//! call through the port traits.
//!
//! ```text
//!  send_*  ──▶ codec ──▶ stamp(time, serial) ──▶ RadioTransport::send_raw
//!
//!  RadioTransport::receive_raw ──▶ length check ──▶ codec ──▶ last packet
//!                                                     └──▶ PacketHandler
//! ```

use log::{debug, info, warn};

use crate::config::RadioConfig;
use crate::error::{Error, Result};
use crate::json;
use crate::packet::{Payload, RadioPacket, RawPacket};

use super::events::{PacketProperty, ReceivedPacket};
use super::ports::{DeviceInfo, PacketHandler, RadioTransport, SerialPort};

pub struct RadioService {
    config: RadioConfig,
    last: Option<ReceivedPacket>,
    sent: u32,
    received: u32,
    dropped: u32,
}

impl RadioService {
    pub fn new(config: RadioConfig) -> Self {
        info!(
            "RadioService ready (transmit_serial={}, poll_budget={})",
            config.transmit_serial_number, config.max_packets_per_poll
        );
        Self {
            config,
            last: None,
            sent: 0,
            received: 0,
            dropped: 0,
        }
    }

    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    /// Include (or stop including) the device serial number in outbound
    /// packets.
    pub fn set_transmit_serial_number(&mut self, transmit: bool) {
        self.config.transmit_serial_number = transmit;
    }

    // ── Send path ─────────────────────────────────────────────

    /// Broadcast a number.  Integers go out as `Number`, anything else as
    /// `Double`.
    pub fn send_number(
        &mut self,
        value: f64,
        radio: &mut impl RadioTransport,
        device: &impl DeviceInfo,
    ) -> Result<RadioPacket> {
        self.send_packet(Payload::number(value), radio, device)
    }

    /// Broadcast a name/value pair (`Value` or `DoubleValue`).
    pub fn send_value(
        &mut self,
        name: &str,
        value: f64,
        radio: &mut impl RadioTransport,
        device: &impl DeviceInfo,
    ) -> Result<RadioPacket> {
        self.send_packet(Payload::value(name, value), radio, device)
    }

    pub fn send_string(
        &mut self,
        text: &str,
        radio: &mut impl RadioTransport,
        device: &impl DeviceInfo,
    ) -> Result<RadioPacket> {
        self.send_packet(Payload::string(text), radio, device)
    }

    pub fn send_buffer(
        &mut self,
        bytes: &[u8],
        radio: &mut impl RadioTransport,
        device: &impl DeviceInfo,
    ) -> Result<RadioPacket> {
        self.send_packet(Payload::buffer(bytes), radio, device)
    }

    /// Stamp `payload` with the sender header and hand it to the radio.
    /// Returns the packet exactly as it went out.
    pub fn send_packet(
        &mut self,
        payload: Payload,
        radio: &mut impl RadioTransport,
        device: &impl DeviceInfo,
    ) -> Result<RadioPacket> {
        let mut packet = RadioPacket::new(payload);
        let serial = if self.config.transmit_serial_number {
            device.serial_number()
        } else {
            0
        };
        packet.stamp(device.running_time_ms(), serial);

        let raw = packet.encode();
        if let Err(e) = radio.send_raw(raw.as_bytes()) {
            warn!("TX | send failed: {:?}", e);
            return Err(Error::Transport);
        }
        self.sent = self.sent.wrapping_add(1);
        debug!("TX | {:?}", raw);
        Ok(packet)
    }

    // ── Receive path ──────────────────────────────────────────

    /// Take one frame off the radio and decode it.
    ///
    /// Returns `None` when nothing is queued.  A frame of the wrong length is
    /// dropped with a warning and reported as `Some(Err(..))`; the last
    /// packet is left untouched in that case.
    pub fn receive(
        &mut self,
        radio: &mut impl RadioTransport,
    ) -> Option<Result<&ReceivedPacket>> {
        let frame = radio.receive_raw()?;
        let raw = match RawPacket::from_slice(&frame.bytes) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("RX | dropping frame: {}", e);
                self.dropped = self.dropped.wrapping_add(1);
                return Some(Err(Error::Frame(e)));
            }
        };
        debug!("RX | rssi={} {:?}", frame.rssi, raw);
        self.received = self.received.wrapping_add(1);
        let received = ReceivedPacket {
            packet: RadioPacket::decode(&raw),
            signal: frame.rssi,
        };
        let stored: &ReceivedPacket = self.last.insert(received);
        Some(Ok(stored))
    }

    /// Drain up to `max_packets_per_poll` frames, dispatching each decoded
    /// packet to `handler`.  Returns the number of packets dispatched.
    pub fn poll(
        &mut self,
        radio: &mut impl RadioTransport,
        handler: &mut impl PacketHandler,
    ) -> usize {
        let mut dispatched = 0;
        for _ in 0..self.config.max_packets_per_poll {
            match self.receive(radio) {
                None => break,
                Some(Err(_)) => {}
                Some(Ok(received)) => {
                    dispatch(received, handler);
                    dispatched += 1;
                }
            }
        }
        dispatched
    }

    // ── Last-packet queries ───────────────────────────────────

    pub fn last_packet(&self) -> Option<&ReceivedPacket> {
        self.last.as_ref()
    }

    /// `time`, `serial` or `signal` of the last packet; 0 before any packet
    /// has been received.
    pub fn received_packet(&self, property: PacketProperty) -> i32 {
        self.last.as_ref().map_or(0, |r| r.property(property))
    }

    /// Number payload of the last packet, 0 if it carried none.
    pub fn received_number(&self) -> f64 {
        self.last_payload()
            .and_then(RadioPacket::number_payload)
            .map_or(0.0, |n| n.as_f64())
    }

    /// String payload of the last packet, empty if it carried none.
    pub fn received_string(&self) -> &str {
        self.last_payload()
            .and_then(RadioPacket::string_payload)
            .unwrap_or_default()
    }

    /// Buffer payload of the last packet, empty if it carried none.
    pub fn received_buffer(&self) -> &[u8] {
        self.last_payload()
            .and_then(RadioPacket::buffer_payload)
            .unwrap_or_default()
    }

    pub fn received_time(&self) -> i32 {
        self.received_packet(PacketProperty::Time)
    }

    pub fn received_serial(&self) -> i32 {
        self.received_packet(PacketProperty::SerialNumber)
    }

    fn last_payload(&self) -> Option<&RadioPacket> {
        self.last.as_ref().map(|r| &r.packet)
    }

    // ── Serial output ─────────────────────────────────────────

    /// Write the last received packet as a JSON line.  Writes nothing if no
    /// packet has been received yet.
    pub fn write_received_packet_to_serial(&self, port: &mut impl SerialPort) -> Result<()> {
        match &self.last {
            Some(r) => json::write_json_line(&r.packet, port, &self.config.serial_line_ending),
            None => Ok(()),
        }
    }

    /// Take the next frame off the radio and write it as a JSON line.
    /// Returns `Ok(false)` when nothing was queued.
    pub fn write_value_to_serial(
        &mut self,
        radio: &mut impl RadioTransport,
        port: &mut impl SerialPort,
    ) -> Result<bool> {
        let packet = match self.receive(radio) {
            None => return Ok(false),
            Some(received) => received?.packet.clone(),
        };
        json::write_json_line(&packet, port, &self.config.serial_line_ending)?;
        Ok(true)
    }

    // ── Counters ──────────────────────────────────────────────

    pub fn sent_count(&self) -> u32 {
        self.sent
    }

    pub fn received_count(&self) -> u32 {
        self.received
    }

    /// Frames rejected by the length check.
    pub fn dropped_count(&self) -> u32 {
        self.dropped
    }
}

impl Default for RadioService {
    fn default() -> Self {
        Self::new(RadioConfig::default())
    }
}

/// Route one packet to the handler callbacks.
pub fn dispatch(received: &ReceivedPacket, handler: &mut impl PacketHandler) {
    handler.on_packet(received);
    match &received.packet.payload {
        Payload::Number(v) => handler.on_number(f64::from(*v)),
        Payload::Double(v) => handler.on_number(*v),
        Payload::Value { name, value } => handler.on_value(name, f64::from(*value)),
        Payload::DoubleValue { name, value } => handler.on_value(name, *value),
        Payload::String(s) => handler.on_string(s),
        Payload::Buffer(b) => handler.on_buffer(b),
        Payload::Unknown(tag) => debug!("RX | unknown packet type {}", tag),
    }
}
