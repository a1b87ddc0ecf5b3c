use std::time::Duration;
use url::Url;

use crate::error::ConfigError;
use crate::theme::{Theme, DEFAULT_THEME};

/// OpenWeatherMap API key. Replace before shipping a build.
pub const WEATHER_API_KEY: &str = "YOUR_OPENWEATHERMAP_API_KEY";
pub const WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const FEEDBACK_ADDRESS: &str = "feedback@widgetbloom.app";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Static settings. Nothing is read from disk or the environment; embedders
/// and tests override fields with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct Config {
    pub weather: WeatherConfig,
    pub display: DisplayConfig,
    pub widget: WidgetConfig,
    pub feedback_address: String,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Base URL of the weather service; `/weather` is appended
    pub base_url: String,
    pub api_key: String,
}

impl WeatherConfig {
    /// Check if the key is set (not the placeholder)
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_key.starts_with("YOUR_")
    }
}

#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub clock_interval: Duration,
    pub affirmation_interval: Duration,
    pub default_theme: String,
}

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// How often the home-screen surface is redrawn
    pub refresh_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather: WeatherConfig {
                base_url: WEATHER_BASE_URL.to_string(),
                api_key: WEATHER_API_KEY.to_string(),
            },
            display: DisplayConfig {
                clock_interval: Duration::from_secs(1),
                affirmation_interval: Duration::from_secs(10),
                default_theme: DEFAULT_THEME.to_string(),
            },
            widget: WidgetConfig {
                refresh_interval: Duration::from_secs(30 * 60),
            },
            feedback_address: FEEDBACK_ADDRESS.to_string(),
        }
    }
}

impl Config {
    pub fn with_weather_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.weather.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.weather.api_key = api_key.into();
        self
    }

    pub fn with_default_theme(mut self, theme: impl Into<String>) -> Self {
        self.display.default_theme = theme.into();
        self
    }

    pub fn with_intervals(mut self, clock: Duration, affirmation: Duration, widget: Duration) -> Self {
        self.display.clock_interval = clock;
        self.display.affirmation_interval = affirmation;
        self.widget.refresh_interval = widget;
        self
    }

    /// Validate and log warnings. Fails if there are any errors.
    pub fn validated(self) -> Result<(Self, ValidationResult), ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((self, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if !self.weather.is_configured() {
            result.add_warning(
                "weather.api_key",
                "Weather API key not configured - lookups will be rejected",
            );
        }

        for (field, interval) in [
            ("display.clock_interval", self.display.clock_interval),
            ("display.affirmation_interval", self.display.affirmation_interval),
            ("widget.refresh_interval", self.widget.refresh_interval),
        ] {
            if interval.is_zero() {
                result.add_error(field, "Interval must be greater than 0");
            }
        }

        if Theme::find(&self.display.default_theme).is_none() {
            result.add_error(
                "display.default_theme",
                format!("Unknown theme: {}", self.display.default_theme),
            );
        }

        if !self.feedback_address.contains('@') {
            result.add_warning("feedback_address", "Feedback address has no '@'");
        }

        result
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
