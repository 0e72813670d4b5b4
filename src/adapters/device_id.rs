//! Device identity derived from the factory MAC address.
//!
//! The 32-bit serial number stamped into outbound packets is the last four
//! MAC bytes read big-endian, so it is stable across reboots and distinct
//! per radio.  A short `RP-XXYYZZ` id is derived from the last three bytes
//! for log lines.

use crate::app::ports::DeviceInfo;

use super::time::DeviceClock;

/// Fixed-size device ID string: "RP-XXYYZZ".
pub type DeviceIdString = heapless::String<16>;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Read the factory MAC address from eFuse.
#[cfg(target_os = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    unsafe {
        esp_idf_svc::sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
}

/// Serial number carried in the packet header.
pub fn serial_number(mac: &MacAddress) -> i32 {
    i32::from_be_bytes([mac[2], mac[3], mac[4], mac[5]])
}

/// Short id for logs, e.g. `RP-EFCAFE`.
pub fn device_id(mac: &MacAddress) -> DeviceIdString {
    let mut id = DeviceIdString::new();
    use core::fmt::Write;
    let _ = write!(id, "RP-{:02X}{:02X}{:02X}", mac[3], mac[4], mac[5]);
    id
}

/// [`DeviceInfo`] backed by the factory MAC and the device clock.
pub struct DeviceIdentity {
    serial: i32,
    clock: DeviceClock,
}

impl DeviceIdentity {
    pub fn new(mac: &MacAddress, clock: DeviceClock) -> Self {
        log::info!("device {} serial={:#010x}", device_id(mac), serial_number(mac));
        Self {
            serial: serial_number(mac),
            clock,
        }
    }

    /// Identity of this board.
    pub fn local() -> Self {
        Self::new(&read_mac(), DeviceClock::new())
    }
}

impl DeviceInfo for DeviceIdentity {
    fn running_time_ms(&self) -> i32 {
        self.clock.running_time_ms()
    }

    fn serial_number(&self) -> i32 {
        self.serial
    }
}
