//! RadioPacket library.
//!
//! Fixed-size 28-byte packet codec for short-range device-to-device radio,
//! plus the thin send/receive service that stamps outbound packets,
//! dispatches inbound ones and renders them as JSON for a serial console.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Adapters: LoopbackRadio · DeviceIdentity · LogSerialPort │
//! │  ─────────────────── Port traits ──────────────────────  │
//! │  RadioService (stamp · dispatch · last packet · JSON)     │
//! │  ─────────────────────────────────────────────────────── │
//! │  packet: Payload ⇄ RadioPacket ⇄ RawPacket [u8; 28]       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything that needs ESP-IDF is guarded by
//! `#[cfg(target_os = "espidf")]` inside the adapters; the rest builds and
//! tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod json;
pub mod packet;

pub use error::{Error, FrameError, Result};
pub use packet::{Number, PACKET_SIZE, PacketType, Payload, RadioPacket, RawPacket};
