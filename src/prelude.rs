//! Prelude module for common aqmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use aqmap::prelude::*;`

pub use crate::core::{
    config::DashboardConfig,
    geo::{LatLng, LatLngBounds, Point},
    viewport::{MapSize, Viewport, ViewportFitter},
};

pub use crate::data::{
    feed::{group_by_status, parse_feed, parse_feed_lenient, AirStatus, StationReading},
    fetch::{load_feed, FeedSource, FeedState, HttpFeedSource, StaticFeedSource},
};

pub use crate::location::{nearest_station, FixedPosition, GeolocationProvider, NoGeolocation};

pub use crate::ui::{
    panel::render_panel,
    state::{DashboardState, DetailMode, MapView, ViewMode},
    style::{DisplayMode, MapStyle, MapThemes},
};

pub use crate::{Error as MapError, Result};
