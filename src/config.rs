//! Radio service configuration.
//!
//! Values can be persisted to flash with [`RadioConfig::save`] and read
//! back with [`RadioConfig::load`] (postcard encoding).

use serde::{Deserialize, Serialize};

/// Line terminator type for the serial JSON writer.
pub type LineEnding = heapless::String<4>;

/// Upper bound of [`RadioConfig::save`] output.
pub const MAX_CONFIG_BYTES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioConfig {
    /// Stamp outbound packets with this device's serial number.
    /// When `false` the serial field is sent as 0.
    pub transmit_serial_number: bool,
    /// Most inbound packets drained by a single `poll` call.
    pub max_packets_per_poll: u8,
    /// Appended after every JSON line written to serial.
    pub serial_line_ending: LineEnding,
}

impl Default for RadioConfig {
    fn default() -> Self {
        let mut serial_line_ending = LineEnding::new();
        let _ = serial_line_ending.push_str("\r\n");
        Self {
            transmit_serial_number: false,
            max_packets_per_poll: 4,
            serial_line_ending,
        }
    }
}

impl RadioConfig {
    /// Encode into `buf`, returning the used prefix.  `None` if `buf` is too
    /// small.
    pub fn save<'a>(&self, buf: &'a mut [u8]) -> Option<&'a mut [u8]> {
        postcard::to_slice(self, buf).ok()
    }

    /// Decode a blob written by [`save`](Self::save).  `None` if the blob is
    /// corrupted.
    pub fn load(bytes: &[u8]) -> Option<Self> {
        postcard::from_bytes(bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = RadioConfig::default();
        assert!(!c.transmit_serial_number, "serial is opt-in");
        assert!(c.max_packets_per_poll > 0);
        assert_eq!(c.serial_line_ending.as_str(), "\r\n");
    }

    #[test]
    fn serde_roundtrip() {
        let mut c = RadioConfig::default();
        c.transmit_serial_number = true;
        let json = serde_json::to_string(&c).unwrap();
        let c2: RadioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn postcard_roundtrip() {
        let mut c = RadioConfig::default();
        c.max_packets_per_poll = 9;
        let mut buf = [0u8; MAX_CONFIG_BYTES];
        let used = c.save(&mut buf).unwrap().len();
        assert_eq!(RadioConfig::load(&buf[..used]), Some(c));
    }

    #[test]
    fn save_into_short_buffer_fails() {
        let mut buf = [0u8; 2];
        assert!(RadioConfig::default().save(&mut buf).is_none());
    }

    #[test]
    fn corrupted_blob_is_rejected() {
        assert_eq!(RadioConfig::load(&[0x01, 0x04, 0xFF]), None);
    }
}
