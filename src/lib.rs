//! A library for driving the Wireless RT100 keyboard status display over USB HID.
//!
//! The RT100 keyboard carries a small auxiliary display that can show the host's
//! CPU load, a temperature and the date/time. The keyboard is driven through HID
//! feature reports: every command is a fixed 128-byte report consisting of an
//! opcode prefix, the encoded value and zero padding, and every command must be
//! followed by a fixed poll/delay handshake before the device accepts the next
//! one.
//!
//! The crate is split the same way the device protocol is layered:
//!
//! 1. [`protocol`] — pure encoding of commands into report payloads, including
//!    the device's range clamps and the wraparound encoding of negative
//!    temperatures. No I/O.
//! 2. [`hid_channel`] — ownership of the open HID handle and the raw
//!    write-report / read-report primitives, with size enforcement.
//! 3. [`hid_client`] — the [`hid_client::RT100`] driver combining both into the
//!    device's init sequence, the per-command poll handshake and the 24-hour
//!    rate limit on time updates.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rt100_lib::{hid_client, protocol};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = hidapi::HidApi::new()?;
//!     let mut display = hid_client::RT100::open(&api)?;
//!
//!     display.set_cpu(protocol::CpuLoad::new(42))?;
//!     display.set_temperature(protocol::Temperature::new(-10))?;
//!     display.set_time(hid_client::TimeValue::Now)?;
//!
//!     Ok(())
//! }
//! ```

pub mod hid_channel;
pub mod hid_client;
pub mod protocol;
