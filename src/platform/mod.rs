//! Platform abstraction layer
//!
//! Handles the host side of the hardware link:
//! - Serial device reader thread
//! - Typed link events queued for the frame loop

pub mod serial;

pub use serial::{DeviceEvent, DeviceLink, LinkState, open_serial};
