//! Centralized error types for WidgetBloom.
//!
//! Weather-flow failures never crash the app. Each kind maps to a short
//! status string that takes the place of the weather text on the display.

use thiserror::Error;

/// Outcomes of the location and weather flow that end an attempt.
///
/// All of them are recovered by a degraded display state: the manual city
/// prompt or a static status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable")]
    LocationUnavailable,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

impl FlowError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FlowError::PermissionDenied => "Location services denied.",
            FlowError::LocationUnavailable => "Location unavailable. Enter a city.",
            FlowError::CityNotFound(_) => "City not found.",
            FlowError::NetworkFailure(_) => "Could not retrieve weather.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
