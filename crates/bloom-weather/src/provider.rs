//! Client for the OpenWeatherMap "current weather" endpoint.
//!
//! Every lookup is a single request with metric units. There is no retry and
//! no timeout beyond the HTTP client default.

use crate::types::{Coordinates, CurrentWeatherResponse, WeatherError, WeatherResult};
use reqwest::Client;
use std::sync::Arc;
use tracing::instrument;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const UNITS: &str = "metric";
const USER_AGENT: &str = concat!("WidgetBloom/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, WeatherError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Current weather at a position
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_by_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherResult, WeatherError> {
        self.fetch(&[
            ("lat", coordinates.latitude.to_string()),
            ("lon", coordinates.longitude.to_string()),
        ])
        .await
    }

    /// Current weather for a city name, e.g. "Paris" or "Paris,FR"
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_by_city(&self, city: &str) -> Result<WeatherResult, WeatherError> {
        self.fetch(&[("q", city.to_string())]).await
    }

    async fn fetch(&self, query: &[(&str, String)]) -> Result<WeatherResult, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Weather service returned status {}", status);
            return Err(WeatherError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: CurrentWeatherResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;
        let result = parsed.into_result()?;

        tracing::info!("Fetched weather: {}", result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let provider = WeatherProvider::new("http://localhost:8080/data/2.5/", "key").unwrap();
        assert_eq!(provider.base_url, "http://localhost:8080/data/2.5");
    }

    #[test]
    fn test_user_agent_names_the_app() {
        assert!(USER_AGENT.starts_with("WidgetBloom/"));
    }
}
