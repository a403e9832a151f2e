//! Encoding of RT100 display commands into HID feature report payloads.
//!
//! Everything in this module is pure: a command value goes in, the unpadded
//! report payload (opcode prefix plus encoded fields) comes out. Padding to the
//! fixed report size happens in [`pad`], which is the single place the size
//! bound is enforced.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// USB vendor id of the Wireless RT100 keyboard.
pub const VENDOR_ID: u16 = 0x3151;
/// USB product id of the Wireless RT100 keyboard.
pub const PRODUCT_ID: u16 = 0x4011;
/// The display is driven through HID interface 1; the other interfaces belong
/// to the keyboard itself.
pub const INTERFACE_NUMBER: i32 = 1;
/// Every feature report exchanged with the device is exactly this many bytes.
pub const REPORT_SIZE: usize = 128;

/// Query report asking the device to prepare a feature report for reading.
pub const QUERY_REPORT: [u8; 1] = [0xF7];
/// First vendor-specific init command, sent once after opening the device.
pub const INIT_REPORT_A: [u8; 2] = [0xFE, 0x40];
/// Second vendor-specific init command, sent once after opening the device.
pub const INIT_REPORT_B: [u8; 2] = [0xF6, 0x0A];

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The payload does not fit into a [`REPORT_SIZE`] byte report. The fixed
    /// opcode layouts cannot produce this, but it is checked rather than
    /// assumed.
    #[error("report payload of {0} bytes exceeds the report size of {REPORT_SIZE} bytes")]
    ReportTooLarge(usize),
}

/// Zero-pads `payload` to a full [`REPORT_SIZE`] byte report.
///
/// # Examples
///
/// ```
/// use rt100_lib::protocol;
///
/// let report = protocol::pad(&protocol::QUERY_REPORT)?;
/// assert_eq!(report.len(), protocol::REPORT_SIZE);
/// assert_eq!(report[0], 0xF7);
/// assert!(report[1..].iter().all(|b| *b == 0));
/// # Ok::<(), protocol::Error>(())
/// ```
pub fn pad(payload: &[u8]) -> Result<[u8; REPORT_SIZE], Error> {
    if payload.len() > REPORT_SIZE {
        return Err(Error::ReportTooLarge(payload.len()));
    }
    let mut report = [0u8; REPORT_SIZE];
    report[..payload.len()].copy_from_slice(payload);
    Ok(report)
}

/// CPU load percentage shown on the display.
///
/// The display only has two digits, so values are clamped to
/// [[`Self::MIN`], [`Self::MAX`]] rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuLoad(u8);

impl CpuLoad {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 99;

    const OPCODE: [u8; 16] = [
        0x22, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xDD, 0xAB, 0x07, 0x8E, 0x19, 0x06, 0x00, 0x20,
        0x00,
    ];

    /// Creates a CPU load value, clamping to the displayable range.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX) as u8)
    }

    /// Encodes the command payload: opcode prefix followed by the value byte.
    pub fn encode(&self) -> Vec<u8> {
        let mut payload = Self::OPCODE.to_vec();
        payload.push(self.0);
        payload
    }
}

impl From<i32> for CpuLoad {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for CpuLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Temperature in degrees Celsius shown on the display.
///
/// Clamped to [[`Self::MIN`], [`Self::MAX`]]. The device expects a single
/// unsigned byte; negative values wrap around modulo 256 (`256 + value`), i.e.
/// the byte carries the two's complement representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperature(i8);

impl Temperature {
    pub const MIN: i32 = -99;
    pub const MAX: i32 = 127;

    const OPCODE: [u8; 8] = [0x2A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xD5];

    /// Creates a temperature value, clamping to the displayable range.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX) as i8)
    }

    /// Encodes the command payload: opcode prefix followed by the wrapped
    /// value byte.
    pub fn encode(&self) -> Vec<u8> {
        let mut payload = Self::OPCODE.to_vec();
        // i8 -> u8 cast is exactly the modulo-256 wraparound the device wants.
        payload.push(self.0 as u8);
        payload
    }
}

impl From<i32> for Temperature {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar timestamp shown on the display.
///
/// Encoded as six fields after the opcode: year as two big-endian bytes, then
/// month, day, hour, minute and second as one byte each. Distinct timestamps
/// always encode to distinct payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime(NaiveDateTime);

impl DateTime {
    const OPCODE: [u8; 8] = [0x28, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xD7];

    /// Encodes the command payload: opcode prefix followed by the six
    /// timestamp fields.
    pub fn encode(&self) -> Vec<u8> {
        let mut payload = Self::OPCODE.to_vec();
        let year = self.0.year() as u16;
        payload.extend_from_slice(&year.to_be_bytes());
        payload.push(self.0.month() as u8);
        payload.push(self.0.day() as u8);
        payload.push(self.0.hour() as u8);
        payload.push(self.0.minute() as u8);
        payload.push(self.0.second() as u8);
        payload
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn timestamp(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn cpu_load_clamps_and_encodes() {
        assert_eq!(CpuLoad::new(42).encode().len(), 17);
        assert_eq!(*CpuLoad::new(0).encode().last().unwrap(), 0x00);
        assert_eq!(*CpuLoad::new(42).encode().last().unwrap(), 42);
        assert_eq!(*CpuLoad::new(99).encode().last().unwrap(), 0x63);
        // Out-of-range values clamp, they are not rejected.
        assert_eq!(*CpuLoad::new(150).encode().last().unwrap(), 0x63);
        assert_eq!(*CpuLoad::new(-5).encode().last().unwrap(), 0x00);
    }

    #[test]
    fn cpu_load_opcode_prefix() {
        let payload = CpuLoad::new(1).encode();
        assert_eq!(
            &payload[..16],
            &[
                0x22, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xDD, 0xAB, 0x07, 0x8E, 0x19, 0x06,
                0x00, 0x20, 0x00
            ]
        );
    }

    #[test]
    fn temperature_clamps_and_wraps() {
        assert_eq!(*Temperature::new(21).encode().last().unwrap(), 21);
        assert_eq!(*Temperature::new(127).encode().last().unwrap(), 0x7F);
        assert_eq!(*Temperature::new(-10).encode().last().unwrap(), 0xF6);
        assert_eq!(*Temperature::new(-99).encode().last().unwrap(), 157);
        // Clamp first, wrap second.
        assert_eq!(*Temperature::new(200).encode().last().unwrap(), 0x7F);
        assert_eq!(*Temperature::new(-200).encode().last().unwrap(), 157);
    }

    #[test]
    fn temperature_opcode_prefix() {
        let payload = Temperature::new(0).encode();
        assert_eq!(payload.len(), 9);
        assert_eq!(
            &payload[..8],
            &[0x2A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xD5]
        );
    }

    #[test]
    fn date_time_field_layout() {
        let payload = DateTime::from(timestamp(2024, 1, 15, 10, 30, 0)).encode();
        assert_eq!(payload.len(), 15);
        assert_eq!(
            &payload[..8],
            &[0x28, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xD7]
        );
        // 2024 = 0x07E8, big-endian.
        assert_eq!(payload[8], 0x07);
        assert_eq!(payload[9], 0xE8);
        assert_eq!(payload[10], 1);
        assert_eq!(payload[11], 15);
        assert_eq!(payload[12], 10);
        assert_eq!(payload[13], 30);
        assert_eq!(payload[14], 0);
    }

    #[test]
    fn date_time_round_trip() {
        let ts = timestamp(2031, 12, 31, 23, 59, 58);
        let payload = DateTime::from(ts).encode();
        let year = u16::from_be_bytes([payload[8], payload[9]]) as i32;
        let decoded = NaiveDate::from_ymd_opt(year, payload[10] as u32, payload[11] as u32)
            .unwrap()
            .and_hms_opt(payload[12] as u32, payload[13] as u32, payload[14] as u32)
            .unwrap();
        assert_eq!(decoded, ts);
    }

    #[test]
    fn date_time_injective() {
        let a = DateTime::from(timestamp(2024, 1, 15, 10, 30, 0)).encode();
        let b = DateTime::from(timestamp(2024, 1, 15, 10, 30, 1)).encode();
        let c = DateTime::from(timestamp(2025, 1, 15, 10, 30, 0)).encode();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn pad_fills_with_zeros() {
        let report = pad(&[0xF7]).unwrap();
        assert_eq!(report.len(), REPORT_SIZE);
        assert_eq!(report[0], 0xF7);
        assert!(report[1..].iter().all(|b| *b == 0));

        let full = pad(&[0xAA; REPORT_SIZE]).unwrap();
        assert!(full.iter().all(|b| *b == 0xAA));
    }

    #[test]
    fn pad_rejects_oversized_payload() {
        assert!(matches!(
            pad(&[0u8; REPORT_SIZE + 1]),
            Err(Error::ReportTooLarge(129))
        ));
    }
}
