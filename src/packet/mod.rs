//! Fixed-size radio packet codec.
//!
//! ```text
//!  application value ──▶ Payload ──▶ RadioPacket ──▶ RawPacket ──▶ send_raw
//!                                      (stamped)      [u8; 28]
//!
//!  receive_raw ──▶ RawPacket ──▶ RadioPacket ──▶ handlers / JSON writer
//! ```
//!
//! The codec is stateless and total: it never allocates beyond the 28-byte
//! buffer, never fails on oversize input (it truncates), and never fails on
//! odd input from the air (mismatched fields read as absent).

pub mod layout;
pub mod message;
pub mod payload;
pub mod raw;

pub use layout::{PACKET_SIZE, PacketType};
pub use message::RadioPacket;
pub use payload::{Number, Payload};
pub use raw::RawPacket;
