//! End-to-end tests for DisplayController against a mock weather service.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bloom_core::{Color, Config, SurfaceStyle, Theme, WidgetView, AFFIRMATIONS};
use bloom_ui::{
    DisplayController, DisplayState, DisplaySurface, FlowState, HomeScreenSurface, Services,
    UiError,
};
use bloom_weather::{
    Coordinates, FixedLocation, FixedPermission, NoLocationService, PermissionGate,
    PermissionStatus, WeatherProvider,
};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default)]
struct Recorded {
    clock: String,
    affirmation: String,
    weather: String,
    city_entry_visible: bool,
    background: Option<Color>,
    photo: Option<String>,
    links: Vec<String>,
}

#[derive(Clone, Default)]
struct RecordingSurface(Arc<Mutex<Recorded>>);

impl DisplaySurface for RecordingSurface {
    fn set_clock(&mut self, text: &str) {
        self.0.lock().clock = text.to_string();
    }
    fn set_date(&mut self, _text: &str) {}
    fn set_affirmation(&mut self, text: &str) {
        self.0.lock().affirmation = text.to_string();
    }
    fn set_weather(&mut self, text: &str) {
        self.0.lock().weather = text.to_string();
    }
    fn set_city_entry_visible(&mut self, visible: bool) {
        self.0.lock().city_entry_visible = visible;
    }
    fn set_style(&mut self, style: &SurfaceStyle) {
        self.0.lock().background = Some(style.root_background);
    }
    fn set_photo(&mut self, path: &Path) {
        self.0.lock().photo = Some(path.display().to_string());
    }
    fn open_link(&mut self, url: &Url) {
        self.0.lock().links.push(url.to_string());
    }
}

#[derive(Clone, Default)]
struct RecordingHomeScreen(Arc<Mutex<Vec<WidgetView>>>);

impl HomeScreenSurface for RecordingHomeScreen {
    fn update(&mut self, view: &WidgetView) {
        self.0.lock().push(view.clone());
    }
}

/// Permission gate that counts prompts
struct CountingPermission {
    current: PermissionStatus,
    answer: PermissionStatus,
    prompts: Arc<AtomicUsize>,
}

impl PermissionGate for CountingPermission {
    fn check(&self) -> PermissionStatus {
        self.current
    }

    async fn request(&self, _request_code: u32) -> PermissionStatus {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

fn paris_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Paris",
        "main": { "temp": 21.7 },
        "weather": [{ "main": "Clouds", "description": "broken clouds" }]
    })
}

fn config(base_url: &str) -> Config {
    Config::default()
        .with_weather_base_url(base_url)
        .with_api_key("test-key")
}

async fn wait_for(recorded: &Arc<Mutex<Recorded>>, condition: impl Fn(&Recorded) -> bool) {
    for _ in 0..300 {
        if condition(&*recorded.lock()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached, surface is {:?}", *recorded.lock());
}

async fn start<P, L>(
    config: Config,
    services: Services<P, L>,
) -> (
    RecordingSurface,
    RecordingHomeScreen,
    bloom_ui::ControllerHandle,
    tokio::task::JoinHandle<DisplayState>,
)
where
    P: PermissionGate,
    L: bloom_weather::LocationSource,
{
    let surface = RecordingSurface::default();
    let home_screen = RecordingHomeScreen::default();
    let controller = DisplayController::new(config, surface.clone(), home_screen.clone(), services)
        .with_rng(StdRng::seed_from_u64(9));
    let handle = controller.handle();
    let task = tokio::spawn(controller.run());
    (surface, home_screen, handle, task)
}

#[tokio::test]
async fn test_permission_denied_shows_manual_entry_without_fetching() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let prompts = Arc::new(AtomicUsize::new(0));
    let permission = CountingPermission {
        current: PermissionStatus::Denied,
        answer: PermissionStatus::Denied,
        prompts: Arc::clone(&prompts),
    };
    let provider = WeatherProvider::new(&mock_server.uri(), "test-key").unwrap();
    let services = Services::new(
        permission,
        FixedLocation(Coordinates::new(48.85, 2.35)),
        provider,
    );

    let (surface, _, handle, task) = start(config(&mock_server.uri()), services).await;
    wait_for(&surface.0, |r| {
        r.weather == "Location services denied." && r.city_entry_visible
    })
    .await;

    handle.shutdown().unwrap();
    let state = task.await.unwrap();
    assert_eq!(state.flow, FlowState::ManualCityPrompt);
    assert_eq!(prompts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_granted_location_displays_weather() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::new(&mock_server.uri(), "test-key").unwrap();
    let services = Services::new(
        FixedPermission::granted(),
        FixedLocation(Coordinates::new(48.85, 2.35)),
        provider,
    );

    let (surface, _, handle, task) = start(config(&mock_server.uri()), services).await;
    wait_for(&surface.0, |r| r.weather == "Paris: 21°C, Clouds").await;
    assert!(!surface.0.lock().city_entry_visible);

    handle.shutdown().unwrap();
    let state = task.await.unwrap();
    assert_eq!(state.flow, FlowState::Displayed);
    assert!(!state.city_entry_visible);
}

#[tokio::test]
async fn test_missing_location_falls_back_to_city_lookup() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::new(&mock_server.uri(), "test-key").unwrap();
    let services = Services::new(FixedPermission::granted(), NoLocationService, provider);

    let (surface, _, handle, task) = start(config(&mock_server.uri()), services).await;
    wait_for(&surface.0, |r| {
        r.weather == "Location unavailable. Enter a city." && r.city_entry_visible
    })
    .await;

    handle.submit_city("Paris").unwrap();
    wait_for(&surface.0, |r| r.weather == "Paris: 21°C, Clouds").await;

    handle.submit_city("Atlantis").unwrap();
    wait_for(&surface.0, |r| r.weather == "City not found.").await;

    handle.shutdown().unwrap();
    let state = task.await.unwrap();
    assert_eq!(state.flow, FlowState::ManualCityPrompt);
    assert!(state.city_entry_visible);
}

#[tokio::test]
async fn test_unreachable_service_reports_network_failure() {
    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let provider = WeatherProvider::new(&closed, "test-key").unwrap();
    let services = Services::new(FixedPermission::granted(), NoLocationService, provider);

    let (surface, _, handle, task) = start(config(&closed), services).await;
    wait_for(&surface.0, |r| r.city_entry_visible).await;

    handle.submit_city("Paris").unwrap();
    wait_for(&surface.0, |r| r.weather == "Could not retrieve weather.").await;

    handle.shutdown().unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_user_actions_and_home_screen() {
    let mock_server = MockServer::start().await;
    let provider = WeatherProvider::new(&mock_server.uri(), "test-key").unwrap();
    let services = Services::new(FixedPermission::denied(), NoLocationService, provider);

    let (surface, home_screen, handle, task) = start(config(&mock_server.uri()), services).await;

    // Startup renders the clock, an affirmation and the home-screen widget
    wait_for(&surface.0, |r| !r.clock.is_empty() && !r.affirmation.is_empty()).await;
    assert!(AFFIRMATIONS.contains(&surface.0.lock().affirmation.as_str()));
    assert_eq!(home_screen.0.lock().len(), 1);

    handle.select_theme("mint").unwrap();
    let mint = Theme::find("mint").unwrap().background;
    wait_for(&surface.0, |r| r.background == Some(mint)).await;

    handle.select_photo("/tmp/garden.png").unwrap();
    wait_for(&surface.0, |r| r.photo.as_deref() == Some("/tmp/garden.png")).await;

    handle.send_feedback().unwrap();
    wait_for(&surface.0, |r| !r.links.is_empty()).await;
    assert!(surface.0.lock().links[0].starts_with("mailto:"));

    handle.shutdown().unwrap();
    let state = task.await.unwrap();
    assert_eq!(state.theme, "mint");

    // Nothing is listening any more
    assert!(matches!(
        handle.select_theme("pink"),
        Err(UiError::ControllerClosed)
    ));
}

#[tokio::test]
async fn test_dropping_every_handle_stops_the_controller() {
    let mock_server = MockServer::start().await;
    let provider = WeatherProvider::new(&mock_server.uri(), "test-key").unwrap();
    let services = Services::new(FixedPermission::denied(), NoLocationService, provider);

    let (surface, _, handle, task) = start(config(&mock_server.uri()), services).await;
    wait_for(&surface.0, |r| r.city_entry_visible && !r.clock.is_empty()).await;

    // No shutdown message; the timers alone must not keep the loop alive
    drop(handle);
    let state = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("controller kept running without handles")
        .unwrap();
    assert_eq!(state.flow, FlowState::ManualCityPrompt);
}
