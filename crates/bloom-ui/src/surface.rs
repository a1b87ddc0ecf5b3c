//! Rendering seams. The controller pushes text and style updates into a
//! [`DisplaySurface`]; how they get drawn is up to the host.

use std::path::Path;

use bloom_core::{SurfaceStyle, WidgetView};
use url::Url;

use crate::state::DisplayState;

/// The main display
pub trait DisplaySurface {
    fn set_clock(&mut self, text: &str);

    fn set_date(&mut self, text: &str);

    fn set_affirmation(&mut self, text: &str);

    fn set_weather(&mut self, text: &str);

    fn set_city_entry_visible(&mut self, visible: bool);

    fn set_style(&mut self, style: &SurfaceStyle);

    fn set_photo(&mut self, _path: &Path) {}

    /// Hand a link (e.g. the feedback `mailto:`) to the platform
    fn open_link(&mut self, _url: &Url) {}
}

/// The home-screen widget, refreshed on its own schedule
pub trait HomeScreenSurface {
    fn update(&mut self, view: &WidgetView);
}

/// For hosts that have no home-screen widget
#[derive(Debug, Default)]
pub struct NoHomeScreen;

impl HomeScreenSurface for NoHomeScreen {
    fn update(&mut self, _view: &WidgetView) {}
}

/// Push every field of `state`
pub fn render_all<S: DisplaySurface + ?Sized>(surface: &mut S, state: &DisplayState) {
    surface.set_style(&state.style);
    surface.set_clock(&state.clock);
    surface.set_date(&state.date);
    surface.set_affirmation(&state.affirmation);
    surface.set_weather(&state.weather);
    surface.set_city_entry_visible(state.city_entry_visible);
    if let Some(photo) = &state.photo {
        surface.set_photo(photo);
    }
}

/// Push only the fields that differ between `old` and `new`
pub fn render_changes<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    old: &DisplayState,
    new: &DisplayState,
) {
    if old.style != new.style {
        surface.set_style(&new.style);
    }
    if old.clock != new.clock {
        surface.set_clock(&new.clock);
    }
    if old.date != new.date {
        surface.set_date(&new.date);
    }
    if old.affirmation != new.affirmation {
        surface.set_affirmation(&new.affirmation);
    }
    if old.weather != new.weather {
        surface.set_weather(&new.weather);
    }
    if old.city_entry_visible != new.city_entry_visible {
        surface.set_city_entry_visible(new.city_entry_visible);
    }
    if old.photo != new.photo {
        if let Some(photo) = &new.photo {
            surface.set_photo(photo);
        }
    }
}
