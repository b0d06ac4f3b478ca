//! Dashboard configuration
//!
//! Defaults come from [`crate::core::constants`]. A JSON file may override any
//! subset of fields, and a few environment variables override the file.

use crate::core::constants::*;
use crate::core::geo::LatLng;
use crate::core::viewport::{MapSize, Viewport, ViewportFitter};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_FEED_URL: &str = "AQMAP_FEED_URL";
pub const ENV_MAP_WIDTH: &str = "AQMAP_MAP_WIDTH";
pub const ENV_MAP_HEIGHT: &str = "AQMAP_MAP_HEIGHT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub feed_url: String,
    pub map_width: u32,
    pub map_height: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub single_station_zoom: u8,
    /// Shown when neither stations nor a device position are available
    pub default_center: LatLng,
    pub default_zoom: u8,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Start in dark display mode
    pub dark_mode: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            map_width: DEFAULT_MAP_SIZE.0,
            map_height: DEFAULT_MAP_SIZE.1,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            single_station_zoom: SINGLE_STATION_ZOOM,
            default_center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            default_zoom: DEFAULT_ZOOM,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            dark_mode: false,
        }
    }
}

impl DashboardConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Self::from_json_str(&data)
    }

    /// Defaults, then the optional file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `AQMAP_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_FEED_URL) {
            self.feed_url = url;
        }
        if let Some(width) = lookup(ENV_MAP_WIDTH) {
            self.map_width = parse_pixels(ENV_MAP_WIDTH, &width)?;
        }
        if let Some(height) = lookup(ENV_MAP_HEIGHT) {
            self.map_height = parse_pixels(ENV_MAP_HEIGHT, &height)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(MapError::Config(format!(
                "map size must be positive, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.single_station_zoom < self.min_zoom || self.single_station_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "single_station_zoom {} is outside [{}, {}]",
                self.single_station_zoom, self.min_zoom, self.max_zoom
            )));
        }
        if !self.default_center.is_valid() {
            return Err(MapError::Config("default_center is out of range".to_string()));
        }
        if self.feed_url.is_empty() {
            return Err(MapError::Config("feed_url is empty".to_string()));
        }
        Ok(())
    }

    pub fn map_size(&self) -> MapSize {
        MapSize::new(self.map_width, self.map_height)
    }

    pub fn fitter(&self) -> ViewportFitter {
        ViewportFitter::new(self.min_zoom, self.max_zoom, self.single_station_zoom)
    }

    pub fn default_viewport(&self) -> Viewport {
        Viewport::new(self.default_center, self.default_zoom)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_pixels(key: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| MapError::Config(format!("{} must be a pixel count, got {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.map_size(), MapSize::new(436, 747));
        assert_eq!(config.single_station_zoom, 11);
        assert_eq!(config.default_viewport().zoom, 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json_str(r#"{ "map_width": 800, "dark_mode": true }"#)
            .unwrap();
        assert_eq!(config.map_width, 800);
        assert_eq!(config.map_height, 747);
        assert!(config.dark_mode);
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
    }

    #[test]
    fn test_invalid_zoom_range() {
        let err = DashboardConfig::from_json_str(r#"{ "min_zoom": 12, "max_zoom": 4 }"#)
            .unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn test_single_station_zoom_outside_range() {
        let err = DashboardConfig::from_json_str(r#"{ "max_zoom": 8 }"#).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));

        let config =
            DashboardConfig::from_json_str(r#"{ "max_zoom": 8, "single_station_zoom": 8 }"#).unwrap();
        assert_eq!(config.fitter().focus_zoom(), 8);
    }

    #[test]
    fn test_malformed_json() {
        let err = DashboardConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, MapError::Serialization(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = DashboardConfig::default();
        config
            .apply_overrides(|key| match key {
                ENV_FEED_URL => Some("http://localhost/feed.json".to_string()),
                ENV_MAP_HEIGHT => Some(" 600 ".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.feed_url, "http://localhost/feed.json");
        assert_eq!(config.map_height, 600);
        assert_eq!(config.map_width, 436);

        let err = config
            .apply_overrides(|key| (key == ENV_MAP_WIDTH).then(|| "wide".to_string()))
            .unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }
}
