//! Unified error types for the radio packet crate.
//!
//! The codec itself never fails.  Errors only appear where the crate
//! touches the outside world: frames of the wrong size coming off the
//! transport, and send/write failures reported by adapters.  All variants
//! are `Copy` so they can be passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An inbound frame could not be wrapped as a packet.
    Frame(FrameError),
    /// The radio transport refused or failed to send a packet.
    Transport,
    /// The serial console rejected a write.
    Serial,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(e) => write!(f, "frame: {e}"),
            Self::Transport => write!(f, "transport send failed"),
            Self::Serial => write!(f, "serial write failed"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Frame errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The transport delivered this many bytes instead of a full packet.
    WrongLength(usize),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(n) => write!(
                f,
                "expected {} bytes, got {n}",
                crate::packet::PACKET_SIZE
            ),
        }
    }
}

impl core::error::Error for FrameError {}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
