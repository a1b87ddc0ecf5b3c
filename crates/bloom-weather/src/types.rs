use serde::Deserialize;
use std::fmt;

/// Geographic position reported by the platform location service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Current conditions for one place, as shown on the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherResult {
    pub location_name: String,
    pub temperature_celsius: i32,
    pub condition: String,
}

impl fmt::Display for WeatherResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}°C, {}",
            self.location_name, self.temperature_celsius, self.condition
        )
    }
}

/// Body of the `/weather` endpoint. Only the fields we display are decoded.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    name: String,
    main: MainReadings,
    weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
}

impl CurrentWeatherResponse {
    /// Keep the first condition as the label; an empty list is malformed
    pub(crate) fn into_result(self) -> Result<WeatherResult, WeatherError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|entry| entry.main)
            .ok_or_else(|| WeatherError::Parse("response has no weather conditions".into()))?;

        Ok(WeatherResult {
            location_name: self.name,
            // Float-to-int casts truncate toward zero: 21.7 -> 21, -3.7 -> -3
            temperature_celsius: self.main.temp as i32,
            condition,
        })
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("No last known location")]
    NoLastKnownFix,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather service returned HTTP {status}")]
    Status { status: u16 },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// True when the service answered, but not with a 2xx status
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}
