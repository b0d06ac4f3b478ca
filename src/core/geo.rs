use crate::core::constants::{EARTH_RADIUS, MAX_LATITUDE, TILE_SIZE};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }

    /// Calculates the distance in meters to another LatLng using the Haversine formula
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Clamps latitude to the range Mercator can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Projects to world pixel coordinates at `zoom` (spherical Mercator, 256px tiles).
    ///
    /// The origin is the top-left corner of the world; y grows southwards.
    pub fn project(&self, zoom: f64) -> Point {
        let scale = TILE_SIZE as f64 * 2_f64.powf(zoom);
        let lat_rad = Self::clamp_lat(self.lat).to_radians();

        let x = (self.lng + 180.0) / 360.0;
        let y = 0.5 - (PI / 4.0 + lat_rad / 2.0).tan().ln() / (2.0 * PI);

        Point::new(x * scale, y * scale)
    }

    /// Inverse of [`LatLng::project`].
    pub fn unproject(pixel: &Point, zoom: f64) -> Self {
        let scale = TILE_SIZE as f64 * 2_f64.powf(zoom);

        let lng = pixel.x / scale * 360.0 - 180.0;
        let n = PI - 2.0 * PI * pixel.y / scale;
        let lat = n.sinh().atan().to_degrees();

        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Smallest axis-aligned box in lat/lng space containing a set of positions.
///
/// Stored as the northwest (max lat, min lng) and southeast (min lat, max lng)
/// corners, which is the shape slippy-map fitting works with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub north_west: LatLng,
    pub south_east: LatLng,
}

impl LatLngBounds {
    pub fn new(north_west: LatLng, south_east: LatLng) -> Self {
        Self {
            north_west,
            south_east,
        }
    }

    /// Builds the bounding box over `points`.
    ///
    /// Fails with [`MapError::InvalidInput`] when `points` is empty.
    pub fn from_points<'a, I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| MapError::InvalidInput("no positions to bound".to_string()))?;

        let mut bounds = Self::new(*first, *first);
        for point in iter {
            bounds.extend(point);
        }
        Ok(bounds)
    }

    pub fn north(&self) -> f64 {
        self.north_west.lat
    }

    pub fn south(&self) -> f64 {
        self.south_east.lat
    }

    pub fn west(&self) -> f64 {
        self.north_west.lng
    }

    pub fn east(&self) -> f64 {
        self.south_east.lng
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat <= self.north()
            && point.lat >= self.south()
            && point.lng >= self.west()
            && point.lng <= self.east()
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.north_west.lat = self.north_west.lat.max(point.lat);
        self.north_west.lng = self.north_west.lng.min(point.lng);
        self.south_east.lat = self.south_east.lat.min(point.lat);
        self.south_east.lng = self.south_east.lng.max(point.lng);
    }

    /// True when every bounded position is the same point.
    pub fn is_degenerate(&self) -> bool {
        self.north_west.lat == self.south_east.lat && self.north_west.lng == self.south_east.lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(25.0330, 121.5654);
        assert_eq!(coord.lat, 25.0330);
        assert_eq!(coord.lng, 121.5654);
        assert!(coord.is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn test_lat_lng_distance() {
        let taipei = LatLng::new(25.0330, 121.5654);
        let kaohsiung = LatLng::new(22.6273, 120.3014);
        let distance = taipei.distance_to(&kaohsiung);

        // Roughly 297 km apart
        assert!((distance - 297_000.0).abs() < 5_000.0);
    }

    #[test]
    fn test_projection_origin() {
        let origin = LatLng::new(0.0, 0.0).project(0.0);
        assert!((origin.x - 128.0).abs() < 1e-9);
        assert!((origin.y - 128.0).abs() < 1e-9);

        let nw = LatLng::new(MAX_LATITUDE, -180.0).project(1.0);
        assert!(nw.x.abs() < 1e-9);
        assert!(nw.y.abs() < 1e-6);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let coord = LatLng::new(23.96, 120.85);
        let pixel = coord.project(8.0);
        let back = LatLng::unproject(&pixel, 8.0);

        assert!((back.lat - coord.lat).abs() < 1e-9);
        assert!((back.lng - coord.lng).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_from_points() {
        let points = [
            LatLng::new(25.0, 121.5),
            LatLng::new(24.0, 120.5),
            LatLng::new(22.9, 120.2),
        ];
        let bounds = LatLngBounds::from_points(&points).unwrap();

        assert_eq!(bounds.north_west, LatLng::new(25.0, 120.2));
        assert_eq!(bounds.south_east, LatLng::new(22.9, 121.5));
        assert!(points.iter().all(|p| bounds.contains(p)));
        assert!(!bounds.is_degenerate());
    }

    #[test]
    fn test_bounds_from_no_points() {
        let empty: [LatLng; 0] = [];
        let err = LatLngBounds::from_points(&empty).unwrap_err();
        assert!(matches!(err, MapError::InvalidInput(_)));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = LatLngBounds::new(LatLng::new(25.0, 120.0), LatLng::new(22.0, 122.0));
        assert!(bounds.contains(&LatLng::new(23.5, 121.0)));
        assert!(!bounds.contains(&LatLng::new(26.0, 121.0)));
        assert!(!bounds.contains(&LatLng::new(23.5, 119.9)));
    }
}
