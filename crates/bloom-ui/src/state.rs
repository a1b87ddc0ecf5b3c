//! Display state machine.
//!
//! `DisplayState::update` is a pure function of (state, event). It never
//! touches the platform; anything that has to happen outside the state comes
//! back as a [`Command`] for the controller to run.
//!
//! Weather flow:
//!
//! ```text
//! Idle -> AwaitingPermission -> AwaitingLocation -> AwaitingWeatherResponse -> Displayed
//!                 |                    |
//!                 +--------------------+--> ManualCityPrompt -> AwaitingWeatherResponse -> Displayed
//! ```

use std::path::PathBuf;

use bloom_core::{clock, FlowError, SurfaceStyle, DEFAULT_THEME};
use bloom_weather::{Coordinates, PermissionStatus, WeatherResult, LOCATION_PERMISSION_REQUEST_CODE};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    AwaitingPermission,
    AwaitingLocation,
    AwaitingWeatherResponse,
    Displayed,
    ManualCityPrompt,
}

/// Which lookup produced a weather response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherSource {
    Coordinates,
    City,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    Coordinates(Coordinates),
    City(String),
}

impl WeatherQuery {
    pub fn source(&self) -> WeatherSource {
        match self {
            WeatherQuery::Coordinates(_) => WeatherSource::Coordinates,
            WeatherQuery::City(_) => WeatherSource::City,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    /// Cold start of the display
    Started,
    PermissionChecked(PermissionStatus),
    PermissionAnswered {
        request_code: u32,
        status: PermissionStatus,
    },
    LocationResolved(Result<Coordinates, FlowError>),
    CitySubmitted(String),
    WeatherFetched {
        request: u64,
        source: WeatherSource,
        result: Result<WeatherResult, FlowError>,
    },
    ClockTick(DateTime<Local>),
    AffirmationPicked(&'static str),
    ThemeSelected(String),
    PhotoSelected(PathBuf),
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CheckPermission,
    RequestPermission { request_code: u32 },
    ResolveLocation,
    Fetch { request: u64, query: WeatherQuery },
}

/// Everything the main display currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub flow: FlowState,
    pub clock: String,
    pub date: String,
    pub affirmation: String,
    pub weather: String,
    pub city_entry_visible: bool,
    pub theme: &'static str,
    pub style: SurfaceStyle,
    pub photo: Option<PathBuf>,
    permission_prompted: bool,
    /// Id of the most recently issued fetch. Responses to older ones are
    /// dropped, so the last request issued wins.
    latest_request: u64,
}

impl DisplayState {
    /// Fresh state with `theme` applied, falling back to the default theme
    /// for unknown ids
    pub fn new(theme: &str) -> Self {
        let mut style = SurfaceStyle::default();
        let theme = style
            .apply_theme(theme)
            .or_else(|| style.apply_theme(DEFAULT_THEME))
            .map_or(DEFAULT_THEME, |theme| theme.id);

        Self {
            flow: FlowState::Idle,
            clock: String::new(),
            date: String::new(),
            affirmation: String::new(),
            weather: String::new(),
            city_entry_visible: false,
            theme,
            style,
            photo: None,
            permission_prompted: false,
            latest_request: 0,
        }
    }

    pub fn is_latest_request(&self, request: u64) -> bool {
        request == self.latest_request
    }

    pub fn update(mut self, event: Event) -> (Self, Option<Command>) {
        let command = match event {
            Event::Started => self.on_started(),
            Event::PermissionChecked(status) => self.on_permission_checked(status),
            Event::PermissionAnswered {
                request_code,
                status,
            } => self.on_permission_answered(request_code, status),
            Event::LocationResolved(result) => self.on_location_resolved(result),
            Event::CitySubmitted(city) => self.on_city_submitted(&city),
            Event::WeatherFetched {
                request,
                source,
                result,
            } => self.on_weather_fetched(request, source, result),
            Event::ClockTick(now) => {
                self.clock = clock::clock_text(&now);
                self.date = clock::date_text(&now);
                None
            }
            Event::AffirmationPicked(text) => {
                self.affirmation = text.to_string();
                None
            }
            Event::ThemeSelected(id) => {
                if let Some(theme) = self.style.apply_theme(&id) {
                    self.theme = theme.id;
                }
                None
            }
            Event::PhotoSelected(path) => {
                self.photo = Some(path);
                None
            }
        };
        (self, command)
    }

    fn on_started(&mut self) -> Option<Command> {
        if self.flow != FlowState::Idle {
            return None;
        }
        self.flow = FlowState::AwaitingPermission;
        Some(Command::CheckPermission)
    }

    fn on_permission_checked(&mut self, status: PermissionStatus) -> Option<Command> {
        if self.flow != FlowState::AwaitingPermission {
            return None;
        }
        match status {
            PermissionStatus::Granted => self.await_location(),
            // One prompt per session
            PermissionStatus::Denied if !self.permission_prompted => {
                self.permission_prompted = true;
                Some(Command::RequestPermission {
                    request_code: LOCATION_PERMISSION_REQUEST_CODE,
                })
            }
            PermissionStatus::Denied => self.manual_entry(&FlowError::PermissionDenied),
        }
    }

    fn on_permission_answered(
        &mut self,
        request_code: u32,
        status: PermissionStatus,
    ) -> Option<Command> {
        if request_code != LOCATION_PERMISSION_REQUEST_CODE
            || self.flow != FlowState::AwaitingPermission
        {
            return None;
        }
        if status.is_granted() {
            self.await_location()
        } else {
            self.manual_entry(&FlowError::PermissionDenied)
        }
    }

    fn on_location_resolved(&mut self, result: Result<Coordinates, FlowError>) -> Option<Command> {
        if self.flow != FlowState::AwaitingLocation {
            return None;
        }
        match result {
            Ok(coordinates) => Some(self.fetch(WeatherQuery::Coordinates(coordinates))),
            Err(err) => self.manual_entry(&err),
        }
    }

    fn on_city_submitted(&mut self, city: &str) -> Option<Command> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }
        Some(self.fetch(WeatherQuery::City(city.to_string())))
    }

    fn on_weather_fetched(
        &mut self,
        request: u64,
        source: WeatherSource,
        result: Result<WeatherResult, FlowError>,
    ) -> Option<Command> {
        if !self.is_latest_request(request) {
            return None;
        }
        match result {
            Ok(weather) => {
                self.weather = weather.to_string();
                self.flow = FlowState::Displayed;
                if source == WeatherSource::Coordinates {
                    self.city_entry_visible = false;
                }
                None
            }
            // Any failed lookup leaves the user at the city prompt
            Err(err) => self.manual_entry(&err),
        }
    }

    fn await_location(&mut self) -> Option<Command> {
        self.flow = FlowState::AwaitingLocation;
        Some(Command::ResolveLocation)
    }

    fn fetch(&mut self, query: WeatherQuery) -> Command {
        self.latest_request += 1;
        self.flow = FlowState::AwaitingWeatherResponse;
        Command::Fetch {
            request: self.latest_request,
            query,
        }
    }

    fn manual_entry(&mut self, err: &FlowError) -> Option<Command> {
        self.weather = err.user_message().to_string();
        self.city_entry_visible = true;
        self.flow = FlowState::ManualCityPrompt;
        None
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}
