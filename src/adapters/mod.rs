//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter      | Implements           | Connects to                 |
//! |--------------|----------------------|-----------------------------|
//! | `device_id`  | DeviceInfo           | eFuse MAC + device clock    |
//! | `log_sink`   | PacketHandler        | Serial log output           |
//! |              | SerialPort           | Serial log output           |
//! | `loopback`   | RadioTransport       | In-memory channel           |
//! | `time`       | (used by device_id)  | ESP32 system timer          |

pub mod device_id;
pub mod log_sink;
pub mod loopback;
pub mod time;
