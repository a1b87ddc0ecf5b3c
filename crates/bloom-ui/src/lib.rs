//! Display flow for WidgetBloom
//!
//! The pure display state machine, the surfaces it renders to, and the
//! controller that drives it with timers and background weather lookups.

pub mod controller;
pub mod error;
pub mod services;
pub mod state;
pub mod surface;
pub mod timers;

pub use controller::{ControllerHandle, DisplayController, Input, Services};
pub use error::UiError;
pub use state::{Command, DisplayState, Event, FlowState, WeatherQuery, WeatherSource};
pub use surface::{DisplaySurface, HomeScreenSurface, NoHomeScreen};
pub use timers::Scheduler;
