//! Synchronous driver for the Wireless RT100 display.
//!
//! Wraps a [`HidChannel`] in the device's command sequence: the fixed init
//! handshake at open time, the mandatory poll/delay after every command and the
//! 24-hour suppression of redundant time updates.

use crate::hid_channel::{HidChannel, Result};
use crate::protocol as proto;
use chrono::{Duration as TimeDelta, Local, NaiveDateTime};
use std::thread::sleep;
use std::time::Duration;

/// Settling delay before and after the query exchange of every poll.
///
/// These timings are a hardware requirement; shortening them makes the device
/// drop commands.
const SETTLE_DELAY: Duration = Duration::from_millis(300);
/// Delay between writing the query report and reading the response.
const READ_DELAY: Duration = Duration::from_millis(50);

/// Minimum interval between two time updates actually sent to the device.
const TIME_UPDATE_INTERVAL: TimeDelta = TimeDelta::days(1);

/// A timestamp to show on the display: either the local clock at call time or
/// an explicit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeValue {
    Now,
    At(NaiveDateTime),
}

impl TimeValue {
    fn resolve(self) -> NaiveDateTime {
        match self {
            TimeValue::Now => Local::now().naive_local(),
            TimeValue::At(timestamp) => timestamp,
        }
    }
}

/// Synchronous client for the Wireless RT100 keyboard status display.
///
/// Opening the driver performs the device's fixed init sequence, so a freshly
/// constructed `RT100` is immediately ready for `set_*` calls. Every command
/// blocks for the poll delays (roughly 650 ms per command).
///
/// # Examples
///
/// ```no_run
/// use rt100_lib::{hid_client::RT100, protocol::CpuLoad};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let api = hidapi::HidApi::new()?;
/// let mut display = RT100::open(&api)?;
/// display.set_cpu(CpuLoad::new(42))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RT100 {
    channel: HidChannel,
    next_time_update: Option<NaiveDateTime>,
}

impl RT100 {
    /// Opens the display interface and runs the init sequence.
    ///
    /// The sequence is fixed and order-dependent: poll to let the device
    /// settle, send the two vendor init commands, poll again.
    pub fn open(api: &hidapi::HidApi) -> Result<Self> {
        let channel = HidChannel::open(
            api,
            proto::VENDOR_ID,
            proto::PRODUCT_ID,
            proto::INTERFACE_NUMBER,
        )?;
        let client = Self {
            channel,
            next_time_update: None,
        };
        client.poll()?;
        client.channel.write_report(&proto::INIT_REPORT_A)?;
        client.channel.write_report(&proto::INIT_REPORT_B)?;
        client.poll()?;
        Ok(client)
    }

    /// The mandatory handshake after every state-changing command: settle,
    /// query, read back, settle again.
    fn poll(&self) -> Result<()> {
        sleep(SETTLE_DELAY);
        self.channel.write_report(&proto::QUERY_REPORT)?;
        sleep(READ_DELAY);
        self.channel.read_report()?;
        sleep(SETTLE_DELAY);
        Ok(())
    }

    /// Shows a CPU load percentage on the display.
    pub fn set_cpu(&mut self, load: proto::CpuLoad) -> Result<()> {
        self.channel.write_report(&load.encode())?;
        self.poll()
    }

    /// Shows a temperature on the display.
    pub fn set_temperature(&mut self, temperature: proto::Temperature) -> Result<()> {
        self.channel.write_report(&temperature.encode())?;
        self.poll()
    }

    /// Shows a date and time on the display.
    ///
    /// Time updates are rate limited: once a timestamp has been sent, requests
    /// at or before that timestamp plus 24 hours are silently dropped without
    /// touching the device. This is intentional (the display keeps its own
    /// clock), not an error.
    pub fn set_time(&mut self, value: TimeValue) -> Result<()> {
        let timestamp = value.resolve();
        if !time_update_due(self.next_time_update, timestamp) {
            return Ok(());
        }
        self.channel
            .write_report(&proto::DateTime::from(timestamp).encode())?;
        self.poll()?;
        self.next_time_update = Some(timestamp + TIME_UPDATE_INTERVAL);
        Ok(())
    }
}

/// Whether a time update for `requested` may be sent given the current
/// deadline. Requests at or before the deadline are suppressed.
fn time_update_due(deadline: Option<NaiveDateTime>, requested: NaiveDateTime) -> bool {
    match deadline {
        Some(deadline) => requested > deadline,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn first_time_update_is_always_due() {
        assert!(time_update_due(None, timestamp(10, 30)));
    }

    #[test]
    fn time_update_suppressed_at_or_before_deadline() {
        let deadline = Some(timestamp(10, 30) + TIME_UPDATE_INTERVAL);
        // Same timestamp again: within the 24h window.
        assert!(!time_update_due(deadline, timestamp(10, 30)));
        // Exactly on the deadline still counts as suppressed.
        assert!(!time_update_due(deadline, timestamp(10, 30) + TIME_UPDATE_INTERVAL));
        // One second past the deadline is due again.
        assert!(time_update_due(
            deadline,
            timestamp(10, 30) + TIME_UPDATE_INTERVAL + TimeDelta::seconds(1)
        ));
    }

    #[test]
    fn time_value_at_resolves_to_itself() {
        let ts = timestamp(10, 30);
        assert_eq!(TimeValue::At(ts).resolve(), ts);
    }
}
