use chrono::NaiveDateTime;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::time::Duration;

/// Parses an ISO 8601 timestamp; the seconds field may be omitted.
fn parse_date_time(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("Invalid date/time '{s}' (expected e.g. 2024-01-15T10:30): {e}"))
}

const fn about_text() -> &'static str {
    "Wireless RT100 CLI - Drive the status display of the Wireless RT100 keyboard over USB HID."
}

#[derive(Parser, Debug)]
#[command(name = "rt100ctl", author, version, about = about_text(), long_about = None)]
pub struct CliArgs {
    /// Configure verbosity of logging output.
    /// -v for info, -vv for debug, -vvv for trace. Default is off.
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    /// Show a fixed CPU load, clamped to [0, 99].
    #[arg(long, allow_negative_numbers = true)]
    pub cpu: Option<i32>,

    /// Show the current CPU load.
    #[arg(long)]
    pub current_cpu: bool,

    /// Show a fixed temperature in °C, clamped to [-99, 127].
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<i32>,

    /// Show the current CPU temperature.
    #[arg(long)]
    pub current_temperature: bool,

    /// Show a fixed date and time in ISO format (e.g. "2024-01-15T10:30:00",
    /// seconds optional).
    #[arg(long, value_parser = parse_date_time, verbatim_doc_comment)]
    pub time: Option<NaiveDateTime>,

    /// Show the current date and time.
    #[arg(long)]
    pub current_time: bool,

    /// Run continuously: refresh CPU load and temperature every PERIOD
    /// (e.g. "10s", "1m"), the time every 24 hours.
    #[arg(long, value_name = "PERIOD", value_parser = humantime::parse_duration, verbatim_doc_comment)]
    pub monitor: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn date_time_with_and_without_seconds() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_date_time("2024-01-15T10:30:00"), Ok(expected));
        assert_eq!(parse_date_time("2024-01-15T10:30"), Ok(expected));
        assert!(parse_date_time("not-a-date").is_err());
    }

    #[test]
    fn negative_flag_values_parse() {
        let args = CliArgs::parse_from(["rt100ctl", "--temperature", "-10"]);
        assert_eq!(args.temperature, Some(-10));

        let args = CliArgs::parse_from(["rt100ctl", "--cpu", "42", "--monitor", "10s"]);
        assert_eq!(args.cpu, Some(42));
        assert_eq!(args.monitor, Some(Duration::from_secs(10)));
    }
}
