//! Radio application core: send orchestration and receive dispatch.
//!
//! Everything that talks to the radio, the clock, the device identity or
//! the serial console goes through the **port traits** in [`ports`], so
//! the service is testable on the host with in-memory adapters.

pub mod events;
pub mod ports;
pub mod service;
