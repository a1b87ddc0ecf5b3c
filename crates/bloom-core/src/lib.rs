pub mod affirmation;
pub mod clock;
pub mod config;
pub mod error;
pub mod feedback;
pub mod theme;
pub mod widget;

pub use affirmation::{pick_affirmation, AFFIRMATIONS};
pub use config::{Config, DisplayConfig, ValidationResult, WeatherConfig, WidgetConfig};
pub use error::{ConfigError, FlowError};
pub use theme::{Color, Control, Panel, SurfaceStyle, Theme, DEFAULT_THEME, THEMES};
pub use widget::WidgetView;

use anyhow::Result;

/// Install the tracing subscriber. `RUST_LOG` overrides the default `info`.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("WidgetBloom core initialized");
    Ok(())
}
