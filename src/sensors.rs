//! Host-side sensor readings for monitor mode.

use log::*;
use std::time::Duration;
use sysinfo::{Components, CpuRefreshKind, RefreshKind, System};

/// Sampling window for the CPU load measurement.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Label of the AMD CPU die temperature sensor.
const CPU_SENSOR_LABEL: &str = "Tctl";

/// Measures the current global CPU load as an integer percentage.
///
/// Blocks for the sampling window, since CPU usage is only meaningful as a
/// delta between two refreshes.
pub fn cpu_load() -> i32 {
    let mut system =
        System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage()));
    std::thread::sleep(CPU_SAMPLE_WINDOW);
    system.refresh_cpu_usage();
    system.global_cpu_usage() as i32
}

/// Reads the current CPU temperature in °C, averaged over all matching die
/// sensors. Returns 0 if no sensor is available.
pub fn cpu_temperature() -> i32 {
    let components = Components::new_with_refreshed_list();
    let readings: Vec<f32> = components
        .iter()
        .filter(|component| component.label() == CPU_SENSOR_LABEL)
        .map(|component| component.temperature())
        .collect();
    if readings.is_empty() {
        warn!("No '{CPU_SENSOR_LABEL}' temperature sensor found, reporting 0");
        return 0;
    }
    (readings.iter().sum::<f32>() / readings.len() as f32) as i32
}
