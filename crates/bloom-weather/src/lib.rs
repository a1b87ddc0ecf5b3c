//! Weather lookups for WidgetBloom
//!
//! Current conditions from OpenWeatherMap, by coordinates or by city name,
//! plus the permission and location seams the display flow resolves first.

pub mod location;
pub mod provider;
pub mod types;

pub use location::{
    resolve_location, FixedLocation, FixedPermission, LocationSource, NoLocationService,
    PermissionGate, PermissionStatus, LOCATION_PERMISSION_REQUEST_CODE,
};
pub use provider::{WeatherProvider, DEFAULT_BASE_URL};
pub use types::*;
