//! The display controller: owns the display state and runs the event loop.
//!
//! Everything that changes the display arrives as an [`Input`] on one
//! channel: user actions from a [`ControllerHandle`], timer ticks, and
//! results of background work. Inputs are handled one at a time, so the
//! state needs no locking.
//!
//! The loop ends on [`ControllerHandle::shutdown`] or once every handle has
//! been dropped. The controller and its timers only hold weak senders.

use std::path::PathBuf;
use std::sync::Arc;

use bloom_core::{feedback, pick_affirmation, Config, WidgetView};
use bloom_weather::{LocationSource, PermissionGate, WeatherProvider};
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::task::JoinHandle;

use crate::error::UiError;
use crate::services::{request_location, request_permission, request_weather_fetch};
use crate::state::{Command, DisplayState, Event};
use crate::surface::{self, DisplaySurface, HomeScreenSurface};
use crate::timers::Scheduler;

/// Messages handled by the event loop
#[derive(Debug, Clone)]
pub enum Input {
    Event(Event),
    ClockTick,
    RotateAffirmation,
    RefreshHomeScreen,
    SendFeedback,
    Shutdown,
}

/// Platform services the weather flow calls out to
pub struct Services<P, L> {
    pub permission: Arc<P>,
    pub location: Arc<L>,
    pub weather: Arc<WeatherProvider>,
}

impl<P, L> Services<P, L> {
    pub fn new(permission: P, location: L, weather: WeatherProvider) -> Self {
        Self {
            permission: Arc::new(permission),
            location: Arc::new(location),
            weather: Arc::new(weather),
        }
    }
}

/// Cloneable sender for user actions
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    tx: UnboundedSender<Input>,
}

impl ControllerHandle {
    pub fn submit_city(&self, city: impl Into<String>) -> Result<(), UiError> {
        self.send(Input::Event(Event::CitySubmitted(city.into())))
    }

    pub fn select_theme(&self, id: impl Into<String>) -> Result<(), UiError> {
        self.send(Input::Event(Event::ThemeSelected(id.into())))
    }

    pub fn select_photo(&self, path: impl Into<PathBuf>) -> Result<(), UiError> {
        self.send(Input::Event(Event::PhotoSelected(path.into())))
    }

    pub fn send_feedback(&self) -> Result<(), UiError> {
        self.send(Input::SendFeedback)
    }

    pub fn shutdown(&self) -> Result<(), UiError> {
        self.send(Input::Shutdown)
    }

    fn send(&self, input: Input) -> Result<(), UiError> {
        self.tx.send(input).map_err(|_| UiError::ControllerClosed)
    }
}

pub struct DisplayController<S, H, P, L> {
    config: Config,
    state: DisplayState,
    surface: S,
    home_screen: H,
    services: Services<P, L>,
    rng: StdRng,
    /// Keeps the channel open until `run` starts
    own_tx: Option<UnboundedSender<Input>>,
    tx: WeakUnboundedSender<Input>,
    rx: UnboundedReceiver<Input>,
    scheduler: Scheduler,
    /// The weather fetch whose answer is still wanted
    in_flight: Option<JoinHandle<()>>,
    background: Vec<JoinHandle<()>>,
}

impl<S, H, P, L> DisplayController<S, H, P, L>
where
    S: DisplaySurface,
    H: HomeScreenSurface,
    P: PermissionGate,
    L: LocationSource,
{
    pub fn new(config: Config, surface: S, home_screen: H, services: Services<P, L>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = DisplayState::new(&config.display.default_theme);
        Self {
            config,
            state,
            surface,
            home_screen,
            services,
            rng: StdRng::from_entropy(),
            tx: tx.downgrade(),
            own_tx: Some(tx),
            rx,
            scheduler: Scheduler::new(),
            in_flight: None,
            background: Vec::new(),
        }
    }

    /// Use a fixed RNG for affirmations, e.g. a seeded one in tests
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn handle(&self) -> ControllerHandle {
        // `run` consumes the controller, so `own_tx` is always still set here
        let tx = self
            .own_tx
            .clone()
            .unwrap_or_else(|| mpsc::unbounded_channel().0);
        ControllerHandle { tx }
    }

    /// Run until shutdown. Timers are cancelled and pending work aborted
    /// before the final state is returned.
    pub async fn run(mut self) -> DisplayState {
        tracing::info!("Starting display controller");
        self.own_tx = None;

        surface::render_all(&mut self.surface, &self.state);
        self.start_timers();
        self.rotate_affirmation();
        self.refresh_home_screen();
        self.dispatch(Event::Started);

        while let Some(input) = self.rx.recv().await {
            match input {
                Input::Event(event) => self.dispatch(event),
                Input::ClockTick => self.dispatch(Event::ClockTick(Local::now())),
                Input::RotateAffirmation => self.rotate_affirmation(),
                Input::RefreshHomeScreen => self.refresh_home_screen(),
                Input::SendFeedback => self.send_feedback(),
                Input::Shutdown => break,
            }
        }

        self.teardown();
        self.state
    }

    fn start_timers(&mut self) {
        let display = &self.config.display;
        self.scheduler.every(
            std::time::Duration::ZERO,
            display.clock_interval,
            self.tx.clone(),
            Input::ClockTick,
        );
        self.scheduler.every(
            display.affirmation_interval,
            display.affirmation_interval,
            self.tx.clone(),
            Input::RotateAffirmation,
        );
        let widget = &self.config.widget;
        self.scheduler.every(
            widget.refresh_interval,
            widget.refresh_interval,
            self.tx.clone(),
            Input::RefreshHomeScreen,
        );
    }

    fn dispatch(&mut self, event: Event) {
        if let Event::WeatherFetched { request, .. } = &event {
            if !self.state.is_latest_request(*request) {
                tracing::debug!("Discarding response to superseded weather request {}", request);
                return;
            }
            self.in_flight = None;
        }

        let (next, command) = self.state.clone().update(event);
        if next.flow != self.state.flow {
            tracing::debug!("Weather flow: {:?} -> {:?}", self.state.flow, next.flow);
        }
        surface::render_changes(&mut self.surface, &self.state, &next);
        self.state = next;

        if let Some(command) = command {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: Command) {
        let Some(tx) = self.tx.upgrade() else {
            tracing::debug!("All handles dropped, skipping {:?}", command);
            return;
        };
        match command {
            Command::CheckPermission => {
                let status = self.services.permission.check();
                tracing::debug!("Location permission: {:?}", status);
                self.dispatch(Event::PermissionChecked(status));
            }
            Command::RequestPermission { request_code } => {
                tracing::info!("Requesting location permission");
                let task = request_permission(
                    &tx,
                    Arc::clone(&self.services.permission),
                    request_code,
                );
                self.track(task);
            }
            Command::ResolveLocation => {
                let task = request_location(&tx, Arc::clone(&self.services.location));
                self.track(task);
            }
            Command::Fetch { request, query } => {
                if let Some(previous) = self.in_flight.take() {
                    tracing::debug!("Aborting superseded weather request");
                    previous.abort();
                }
                self.in_flight = Some(request_weather_fetch(
                    &tx,
                    Arc::clone(&self.services.weather),
                    request,
                    query,
                ));
            }
        }
    }

    fn track(&mut self, task: JoinHandle<()>) {
        self.background.retain(|task| !task.is_finished());
        self.background.push(task);
    }

    fn rotate_affirmation(&mut self) {
        let text = pick_affirmation(&mut self.rng);
        self.dispatch(Event::AffirmationPicked(text));
    }

    fn refresh_home_screen(&mut self) {
        let view = WidgetView::render(&Local::now(), &mut self.rng);
        tracing::debug!("Refreshing home screen");
        self.home_screen.update(&view);
    }

    fn send_feedback(&mut self) {
        match feedback::mailto_url(&self.config.feedback_address) {
            Ok(url) => self.surface.open_link(&url),
            Err(e) => tracing::warn!("Invalid feedback address: {}", e),
        }
    }

    fn teardown(&mut self) {
        self.scheduler.cancel();
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        for task in self.background.drain(..) {
            task.abort();
        }
        tracing::info!("Display controller stopped");
    }
}
