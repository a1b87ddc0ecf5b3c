//! Home-screen widget contents.
//!
//! The widget shows a short clock, the date and an affirmation. It has no
//! weather or theme; tapping it opens the main display.

use chrono::{DateTime, TimeZone};
use rand::Rng;
use std::fmt::Display;

use crate::affirmation::pick_affirmation;
use crate::clock::{widget_clock_text, widget_date_text};

/// Where a tap on the widget leads
pub const OPEN_MAIN_DISPLAY: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub clock: String,
    pub date: String,
    pub affirmation: &'static str,
    pub open_target: &'static str,
}

impl WidgetView {
    /// Fresh view for one refresh cycle. Each refresh draws a new affirmation.
    pub fn render<Tz, R>(now: &DateTime<Tz>, rng: &mut R) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
        R: Rng + ?Sized,
    {
        Self {
            clock: widget_clock_text(now),
            date: widget_date_text(now),
            affirmation: pick_affirmation(rng),
            open_target: OPEN_MAIN_DISPLAY,
        }
    }
}
