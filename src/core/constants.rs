//! Core constants derived from slippy-map conventions and the dashboard defaults.
//! Keeping them in a single place makes it easier to tweak crate-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Lowest zoom level the fitter will return.
pub const MIN_ZOOM: u8 = 0;

/// Highest zoom level the fitter will return.
pub const MAX_ZOOM: u8 = 21;

/// Zoom used when focusing on a single station.
pub const SINGLE_STATION_ZOOM: u8 = 11;

/// Mercator cannot represent the poles; latitudes are clamped to this.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Mean Earth radius used by the Web Mercator projection (EPSG:3857).
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Region center shown before any station or device position is known.
pub const DEFAULT_CENTER: (f64, f64) = (23.5, 121.0);

/// Zoom paired with [`DEFAULT_CENTER`].
pub const DEFAULT_ZOOM: u8 = 11;

/// Public feed of the latest EPA station readings.
pub const DEFAULT_FEED_URL: &str = "https://pm25.lass-net.org/data/last-all-epa.json";

/// Pixel size of the map display area (width, height).
pub const DEFAULT_MAP_SIZE: (u32, u32) = (436, 747);

/// Seconds before a feed request is abandoned.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_USER_AGENT: &str = "aqmap/0.1";
