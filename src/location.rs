//! Device position boundary and nearest-station lookup
//!
//! Acquiring the position (permissions, sensors, browser APIs) belongs to the
//! host. This module only consumes whatever position the host hands over.

use crate::core::geo::LatLng;
use crate::data::feed::StationReading;

/// Supplies the device's current position, if the host has one.
pub trait GeolocationProvider {
    fn current_position(&self) -> Option<LatLng>;
}

/// A provider that never knows where the device is
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl GeolocationProvider for NoGeolocation {
    fn current_position(&self) -> Option<LatLng> {
        None
    }
}

/// A position fixed up front, e.g. from the command line
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub LatLng);

impl GeolocationProvider for FixedPosition {
    fn current_position(&self) -> Option<LatLng> {
        self.0.is_valid().then_some(self.0)
    }
}

/// Reference point for the "nearest station" view: the device position when
/// known, otherwise `fallback`.
pub fn reference_point(provider: &dyn GeolocationProvider, fallback: LatLng) -> LatLng {
    match provider.current_position() {
        Some(position) => {
            log::debug!("using device position ({:.4}, {:.4})", position.lat, position.lng);
            position
        }
        None => {
            log::debug!("no device position, falling back to region center");
            fallback
        }
    }
}

/// The reading closest to `origin` by great-circle distance. Ties keep feed order.
pub fn nearest_station<'a>(
    readings: &'a [StationReading],
    origin: &LatLng,
) -> Option<&'a StationReading> {
    readings
        .iter()
        .map(|r| (r, r.position.distance_to(origin)))
        .fold(None, |best: Option<(&StationReading, f64)>, (r, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((r, d)),
        })
        .map(|(r, _)| r)
}
