//! In-memory radio that hears its own transmissions.
//!
//! Frames passed to `send_raw` are queued in a bounded `embassy-sync`
//! channel and come back out of `receive_raw` in order.  Used for host
//! simulation and tests; [`LoopbackRadio::inject`] feeds arbitrary frames
//! (including malformed ones) as if they came off the air.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;

use crate::app::ports::{InboundFrame, RadioTransport};
use crate::packet::PACKET_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopbackError {
    /// The channel holds `N` frames already.
    Full,
}

pub struct LoopbackRadio<const N: usize> {
    air: Channel<NoopRawMutex, InboundFrame, N>,
    rssi: i32,
}

impl<const N: usize> LoopbackRadio<N> {
    /// `rssi` is reported for every frame sent through the loopback.
    pub fn new(rssi: i32) -> Self {
        Self {
            air: Channel::new(),
            rssi,
        }
    }

    /// Queue a raw frame as if it had been received.  Returns `false` if
    /// the channel is full.
    pub fn inject(&self, bytes: &[u8], rssi: i32) -> bool {
        self.air.try_send(InboundFrame::new(bytes, rssi)).is_ok()
    }

    /// Frames waiting to be received.
    pub fn pending(&self) -> usize {
        self.air.len()
    }
}

impl<const N: usize> RadioTransport for LoopbackRadio<N> {
    type Error = LoopbackError;

    fn send_raw(&mut self, frame: &[u8; PACKET_SIZE]) -> Result<(), LoopbackError> {
        self.air
            .try_send(InboundFrame::new(frame, self.rssi))
            .map_err(|_| LoopbackError::Full)
    }

    fn receive_raw(&mut self) -> Option<InboundFrame> {
        self.air.try_receive().ok()
    }
}
