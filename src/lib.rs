//! # aqmap
//!
//! Core of a single-page air-quality dashboard: reads a public feed of
//! monitoring-station readings, fits a slippy-map viewport around them, and
//! keeps the page's view state.
//!
//! Map rendering, geolocation acquisition and styling engines are left to the
//! host; this crate hands them plain values.

pub mod core;
pub mod data;
pub mod location;
pub mod prelude;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::DashboardConfig,
    geo::{LatLng, LatLngBounds, Point},
    viewport::{MapSize, Viewport, ViewportFitter},
};

pub use crate::data::{
    feed::{parse_feed, AirStatus, StationReading},
    fetch::{load_feed, FeedSource, FeedState, HttpFeedSource},
};

pub use crate::ui::state::{DashboardState, DetailMode, ViewMode};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown station: {0}")]
    UnknownStation(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Initialises `env_logger` once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
