//! Wall-clock helpers for the `clock` command.

use chrono::{DateTime, Local, TimeZone};

/// Local time of day as `HH:MM:SS`.
pub fn clock_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%H:%M:%S").to_string()
}

pub fn now_label() -> String {
    clock_label(&Local::now())
}
