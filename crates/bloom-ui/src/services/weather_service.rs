//! Weather backend: permission prompt, location lookup and weather fetch.
//! All of it runs off the event loop; results come back as controller inputs.

use std::sync::Arc;

use bloom_core::FlowError;
use bloom_weather::{
    resolve_location, LocationError, LocationSource, PermissionGate, WeatherError,
    WeatherProvider,
};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::controller::Input;
use crate::state::{Event, WeatherQuery};

/// Show the permission prompt. Sends `PermissionAnswered` when the user answers.
pub fn request_permission<P: PermissionGate>(
    tx: &UnboundedSender<Input>,
    gate: Arc<P>,
    request_code: u32,
) -> JoinHandle<()> {
    let tx = tx.clone();
    tokio::spawn(async move {
        let status = gate.request(request_code).await;
        tracing::info!("Location permission answered: {:?}", status);
        let _ = tx.send(Input::Event(Event::PermissionAnswered {
            request_code,
            status,
        }));
    })
}

/// Look up the last known position. Sends `LocationResolved`.
pub fn request_location<L: LocationSource>(
    tx: &UnboundedSender<Input>,
    source: Arc<L>,
) -> JoinHandle<()> {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = resolve_location(source.as_ref()).await.map_err(|e| {
            tracing::warn!("Location unavailable: {}", e);
            match e {
                LocationError::PermissionDenied => FlowError::PermissionDenied,
                _ => FlowError::LocationUnavailable,
            }
        });
        let _ = tx.send(Input::Event(Event::LocationResolved(result)));
    })
}

/// Fetch weather for `query`. Sends `WeatherFetched` tagged with `request`.
pub fn request_fetch(
    tx: &UnboundedSender<Input>,
    provider: Arc<WeatherProvider>,
    request: u64,
    query: WeatherQuery,
) -> JoinHandle<()> {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = match &query {
            WeatherQuery::Coordinates(coordinates) => {
                provider.fetch_by_coordinates(*coordinates).await
            }
            WeatherQuery::City(city) => provider.fetch_by_city(city).await,
        };
        let result = result.map_err(|e| {
            tracing::warn!("Weather request {} failed: {}", request, e);
            classify_weather_error(&e, &query)
        });
        let _ = tx.send(Input::Event(Event::WeatherFetched {
            request,
            source: query.source(),
            result,
        }));
    })
}

/// Map a provider error onto what the display shows.
///
/// A rejected city lookup means the city is unknown. A rejected coordinate
/// lookup sends the user to manual entry. Anything else is a network failure.
pub fn classify_weather_error(err: &WeatherError, query: &WeatherQuery) -> FlowError {
    if !err.is_rejected() {
        return FlowError::NetworkFailure(err.to_string());
    }
    match query {
        WeatherQuery::City(city) => FlowError::CityNotFound(city.clone()),
        WeatherQuery::Coordinates(_) => FlowError::LocationUnavailable,
    }
}
