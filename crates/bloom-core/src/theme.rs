//! Color themes and the surface styling they produce.
//!
//! A theme is a background/accent pair. Applying one paints the root
//! background, outlines every panel with the accent, and tints every
//! interactive control with the accent.

use std::fmt;

/// 24-bit RGB color. Formats as `#rrggbb`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const WHITE: Self = Self::from_rgb(0xffffff);
    pub const BLACK: Self = Self::from_rgb(0x000000);

    /// Build from a packed `0xRRGGBB` value; the top byte is ignored
    pub const fn from_rgb(value: u32) -> Self {
        Self {
            red: (value >> 16) as u8,
            green: (value >> 8) as u8,
            blue: value as u8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub background: Color,
    pub accent: Color,
}

pub const DEFAULT_THEME: &str = "lavender";

pub const THEMES: [Theme; 4] = [
    Theme {
        id: "lavender",
        background: Color::from_rgb(0xf5f0ff),
        accent: Color::from_rgb(0x7d33b8),
    },
    Theme {
        id: "mint",
        background: Color::from_rgb(0xe6fff5),
        accent: Color::from_rgb(0x66cdaa),
    },
    Theme {
        id: "babyblue",
        background: Color::from_rgb(0xe0f7ff),
        accent: Color::from_rgb(0x87ceeb),
    },
    Theme {
        id: "pink",
        background: Color::from_rgb(0xfff0f5),
        accent: Color::from_rgb(0xff69b4),
    },
];

impl Theme {
    pub fn find(id: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|theme| theme.id == id)
    }
}

/// Panels that get a themed outline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    Clock,
    Affirmation,
    Weather,
    Photo,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Clock, Panel::Affirmation, Panel::Weather, Panel::Photo];
}

/// Interactive controls whose text and outline follow the accent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    ThemeLavender,
    ThemeMint,
    ThemeBabyBlue,
    ThemePink,
    GetWeather,
    UploadPhoto,
    EmailFeedback,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::ThemeLavender,
        Control::ThemeMint,
        Control::ThemeBabyBlue,
        Control::ThemePink,
        Control::GetWeather,
        Control::UploadPhoto,
        Control::EmailFeedback,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlStyle {
    pub text: Color,
    pub outline: Color,
}

/// Colors currently applied to every visual element of the main display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub root_background: Color,
    panels: [PanelStyle; 4],
    controls: [ControlStyle; 7],
}

impl SurfaceStyle {
    pub const PANEL_STROKE_WIDTH: u8 = 4;

    pub fn panel(&self, panel: Panel) -> PanelStyle {
        self.panels[panel as usize]
    }

    pub fn control(&self, control: Control) -> ControlStyle {
        self.controls[control as usize]
    }

    /// Paint the surface with a theme. Unknown ids leave the style untouched
    /// and return `None`.
    pub fn apply_theme(&mut self, id: &str) -> Option<&'static Theme> {
        let theme = Theme::find(id)?;

        self.root_background = theme.background;
        for panel in &mut self.panels {
            *panel = PanelStyle {
                fill: Color::WHITE,
                stroke: theme.accent,
                stroke_width: Self::PANEL_STROKE_WIDTH,
            };
        }
        for control in &mut self.controls {
            *control = ControlStyle {
                text: theme.accent,
                outline: theme.accent,
            };
        }
        Some(theme)
    }
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            root_background: Color::WHITE,
            panels: [PanelStyle {
                fill: Color::WHITE,
                stroke: Color::BLACK,
                stroke_width: 0,
            }; 4],
            controls: [ControlStyle {
                text: Color::BLACK,
                outline: Color::BLACK,
            }; 7],
        }
    }
}
