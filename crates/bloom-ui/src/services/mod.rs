pub mod weather_service;

pub use weather_service::{
    classify_weather_error, request_fetch as request_weather_fetch, request_location,
    request_permission,
};
