//! Ownership of the open HID handle and the raw feature report primitives.
//!
//! The channel is deliberately dumb: it pads, writes and reads single reports
//! and enforces the size bound. Command sequencing and the poll handshake live
//! in [`crate::hid_client`].

use crate::protocol as proto;
use hidapi::{HidApi, HidDevice};

/// Represents all possible errors that can occur on the HID transport.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No device with the expected vendor/product pair exposes the required
    /// interface.
    #[error("no HID device {vendor_id:04x}:{product_id:04x} with interface {interface_number} found")]
    DeviceNotFound {
        vendor_id: u16,
        product_id: u16,
        interface_number: i32,
    },

    /// The device path was enumerated but opening it failed.
    #[error("cannot open HID device: {0}")]
    OpenFailed(#[source] hidapi::HidError),

    /// A write or read on the open handle failed.
    #[error("HID transport error: {0}")]
    Io(#[from] hidapi::HidError),

    /// Wraps `proto::Error`.
    #[error(transparent)]
    Protocol(#[from] proto::Error),
}

/// The result type for channel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An exclusively owned, non-blocking handle to one HID interface.
///
/// The underlying [`HidDevice`] is closed when the channel is dropped, on every
/// exit path.
pub struct HidChannel {
    device: HidDevice,
}

impl HidChannel {
    /// Enumerates all devices matching `vendor_id`/`product_id`, selects the
    /// one exposing `interface_number` and opens it in non-blocking mode.
    pub fn open(
        api: &HidApi,
        vendor_id: u16,
        product_id: u16,
        interface_number: i32,
    ) -> Result<Self> {
        let info = api
            .device_list()
            .find(|info| {
                info.vendor_id() == vendor_id
                    && info.product_id() == product_id
                    && info.interface_number() == interface_number
            })
            .ok_or(Error::DeviceNotFound {
                vendor_id,
                product_id,
                interface_number,
            })?;
        let device = info.open_device(api).map_err(Error::OpenFailed)?;
        device.set_blocking_mode(false)?;
        Ok(Self { device })
    }

    /// Pads `payload` to the full report size and sends it as a feature
    /// report. The first payload byte doubles as the HID report id.
    pub fn write_report(&self, payload: &[u8]) -> Result<()> {
        let report = proto::pad(payload)?;
        self.device.send_feature_report(&report)?;
        Ok(())
    }

    /// Requests a full-size feature report (report id 0) from the device.
    ///
    /// The RT100 protocol never interprets the returned bytes; the read only
    /// exists so the device can settle after a command, so the data is
    /// discarded here.
    pub fn read_report(&self) -> Result<()> {
        let mut report = [0u8; proto::REPORT_SIZE];
        self.device.get_feature_report(&mut report)?;
        Ok(())
    }
}

impl std::fmt::Debug for HidChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HidChannel").finish_non_exhaustive()
    }
}
