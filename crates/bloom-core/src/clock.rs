//! Clock and date strings for the main display and the home-screen widget.
// https://docs.rs/chrono/latest/chrono/format/strftime/index.html

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// `14:05:09`
pub fn clock_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%H:%M:%S").to_string()
}

/// `Today is Monday, October 19, 2026.`
pub fn date_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("Today is {}.", now.format("%A, %B %-d, %Y"))
}

/// `14:05`
pub fn widget_clock_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%H:%M").to_string()
}

/// `Monday, Oct 19`
pub fn widget_date_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%A, %b %-d").to_string()
}
