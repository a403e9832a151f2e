//! Wireless RT100 display CLI
//!
//! A command-line tool for the status display of the Wireless RT100 keyboard.
//!
//! This tool allows users to:
//! - Show a fixed or the current CPU load.
//! - Show a fixed or the current CPU temperature.
//! - Show a fixed or the current date and time.
//! - Run in a continuous monitor mode that refreshes CPU load and temperature
//!   at a configured period (and the time once every 24 hours), pausing the
//!   cadence while the keyboard has been idle for more than two minutes.
//!
//! The CLI leverages the `rt100_lib` crate for report encoding and device access.

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use log::*;
use rt100_lib::{
    hid_client::{TimeValue, RT100},
    protocol as proto,
};
use std::{panic, thread, time::Duration};

mod activity;
mod commandline;
mod sensors;

/// A cycle proceeds as soon as the keyboard was used within this window; while
/// the user stays idle longer, the wait loop keeps sleeping.
const IDLE_THRESHOLD: Duration = Duration::from_secs(2 * 60);

/// Backoff before reconnecting after a failed update cycle in monitor mode.
const RESTART_BACKOFF: Duration = Duration::from_secs(10);

fn logging_init(loglevel: LevelFilter) -> LoggerHandle {
    let log_handle = Logger::try_with_env_or_str(loglevel.as_str())
        .expect("Cannot init logging")
        .start()
        .expect("Cannot start logging");

    panic::set_hook(Box::new(|panic_info| {
        let (filename, line, column) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line(), loc.column()))
            .unwrap_or(("<unknown_file>", 0, 0));

        let cause_str = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            *s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "<unknown_panic_cause>"
        };

        error!(
            target: "panic",
            "Thread '{}' panicked at '{}': {}:{} - Cause: {}",
            std::thread::current().name().unwrap_or("<unnamed>"),
            filename,
            line,
            column,
            cause_str
        );
    }));
    log_handle
}

/// Opens the display and applies the selected values; in monitor mode, keeps
/// refreshing them until an error tears the connection down.
fn run_cycles(
    args: &commandline::CliArgs,
    activity: Option<&activity::ActivityMonitor>,
) -> Result<()> {
    let api = hidapi::HidApi::new().context("Cannot initialize the HID API")?;
    let mut display = RT100::open(&api).context("Cannot open the RT100 display")?;
    info!("RT100 display opened and initialized");

    // Monitor mode always tracks the live values.
    let monitor_mode = args.monitor.is_some();
    let current_cpu = args.current_cpu || monitor_mode;
    let current_temperature = args.current_temperature || monitor_mode;
    let current_time = args.current_time || monitor_mode;

    loop {
        let cpu = if current_cpu {
            Some(sensors::cpu_load())
        } else {
            args.cpu
        };
        let temperature = if current_temperature {
            Some(sensors::cpu_temperature())
        } else {
            args.temperature
        };
        let time = if current_time {
            Some(TimeValue::Now)
        } else {
            args.time.map(TimeValue::At)
        };

        if let Some(value) = cpu {
            let load = proto::CpuLoad::new(value);
            debug!("Setting CPU load to {load}%");
            display
                .set_cpu(load)
                .with_context(|| format!("Cannot set CPU load to {load}"))?;
        }
        if let Some(value) = temperature {
            let temperature = proto::Temperature::new(value);
            debug!("Setting temperature to {temperature} °C");
            display
                .set_temperature(temperature)
                .with_context(|| format!("Cannot set temperature to {temperature}"))?;
        }
        if let Some(value) = time {
            debug!("Setting time to {value:?}");
            display
                .set_time(value)
                .with_context(|| format!("Cannot set time to {value:?}"))?;
        }

        let (Some(period), Some(activity)) = (args.monitor, activity) else {
            return Ok(());
        };

        // Wait out the configured period, then proceed only once the keyboard
        // has seen recent use; while the user stays away the loop just keeps
        // sleeping and the display stays as it is.
        loop {
            thread::sleep(period);
            if activity.idle_time() <= IDLE_THRESHOLD {
                break;
            }
            trace!(
                "Keyboard idle for {:?}, delaying next update cycle",
                activity.idle_time()
            );
        }
    }
}

fn main() -> Result<()> {
    let args = commandline::CliArgs::parse();

    let _log_handle = logging_init(args.verbose.log_level_filter());
    info!(
        "RT100 CLI started. Log level: {}",
        args.verbose.log_level_filter()
    );

    if args.monitor.is_none() {
        // One-shot: apply the selected values once and surface any error.
        return run_cycles(&args, None);
    }

    // Monitor mode: a failed HID session needs a fresh handle, so any error
    // tears down the whole driver and we reconnect after a backoff.
    let activity = activity::ActivityMonitor::spawn();
    loop {
        if let Err(error) = run_cycles(&args, Some(&activity)) {
            error!("Update cycle failed: {error:#}");
        }
        thread::sleep(RESTART_BACKOFF);
    }
}
