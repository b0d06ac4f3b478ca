use crate::core::constants::{MAX_ZOOM, MIN_ZOOM, SINGLE_STATION_ZOOM};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Pixel size of the map display area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

impl MapSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidInput(format!(
                "map size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// What the map widget should show: a center and an integer zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// Slippy-map zoom level
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }

    /// Converts a coordinate to container pixels for a map of `size`,
    /// with (0, 0) at the top-left corner.
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng, size: MapSize) -> Point {
        let zoom = self.zoom as f64;
        let offset = lat_lng.project(zoom).subtract(&self.center.project(zoom));
        Point::new(
            offset.x + size.width as f64 / 2.0,
            offset.y + size.height as f64 / 2.0,
        )
    }

    /// Whether `lat_lng` falls inside a map of `size` showing this viewport
    pub fn contains(&self, lat_lng: &LatLng, size: MapSize) -> bool {
        // Sub-pixel slack for float round-off at the edges.
        const EPS: f64 = 1e-6;
        let pixel = self.lat_lng_to_pixel(lat_lng, size);
        pixel.x >= -EPS
            && pixel.x <= size.width as f64 + EPS
            && pixel.y >= -EPS
            && pixel.y <= size.height as f64 + EPS
    }

    /// Geographic area visible in a map of `size`
    pub fn bounds(&self, size: MapSize) -> LatLngBounds {
        let zoom = self.zoom as f64;
        let center = self.center.project(zoom);
        let half_w = size.width as f64 / 2.0;
        let half_h = size.height as f64 / 2.0;

        let nw = LatLng::unproject(&Point::new(center.x - half_w, center.y - half_h), zoom);
        let se = LatLng::unproject(&Point::new(center.x + half_w, center.y + half_h), zoom);

        LatLngBounds::new(nw, se)
    }
}

/// Computes the (center, zoom) pair that shows every given position.
///
/// Pure and reentrant: the fitter only holds its zoom limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportFitter {
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Zoom returned when all positions coincide. Fitted boxes never zoom in
    /// further than this.
    pub single_station_zoom: u8,
}

impl Default for ViewportFitter {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            single_station_zoom: SINGLE_STATION_ZOOM,
        }
    }
}

impl ViewportFitter {
    pub fn new(min_zoom: u8, max_zoom: u8, single_station_zoom: u8) -> Self {
        Self {
            min_zoom,
            max_zoom,
            single_station_zoom,
        }
    }

    /// Rejects a zoom range whose lower limit is above its upper limit.
    pub fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidInput(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }

    /// Single-station zoom kept inside `[min_zoom, max_zoom]`. With an
    /// inverted range the upper limit wins.
    pub fn focus_zoom(&self) -> u8 {
        self.single_station_zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Viewport centered on one position at [`ViewportFitter::focus_zoom`].
    pub fn focus(&self, position: LatLng) -> Viewport {
        Viewport::new(position, self.focus_zoom())
    }

    fn ceiling(&self) -> u8 {
        self.max_zoom.min(self.single_station_zoom).max(self.min_zoom)
    }

    /// Fits `positions` into a map of `size`.
    ///
    /// Errors with [`MapError::InvalidInput`] on an empty sequence or a zero
    /// pixel size, and [`MapError::InvalidCoordinates`] on out-of-range input.
    pub fn fit(&self, positions: &[LatLng], size: MapSize) -> Result<Viewport> {
        self.validate()?;
        size.validate()?;
        if let Some(bad) = positions.iter().find(|p| !p.is_valid()) {
            return Err(MapError::InvalidCoordinates(format!(
                "({}, {}) is outside lat [-90, 90] / lng [-180, 180]",
                bad.lat, bad.lng
            )));
        }

        let bounds = LatLngBounds::from_points(positions)?;
        self.fit_bounds(&bounds, size)
    }

    /// Fits an already computed bounding box into a map of `size`.
    pub fn fit_bounds(&self, bounds: &LatLngBounds, size: MapSize) -> Result<Viewport> {
        self.validate()?;
        size.validate()?;

        if bounds.is_degenerate() {
            return Ok(self.focus(bounds.north_west));
        }

        let width = size.width as f64;
        let height = size.height as f64;

        // Shrink from the ceiling until the projected box fits both dimensions.
        let mut best_zoom = self.min_zoom;
        for test_zoom in (self.min_zoom..=self.ceiling()).rev() {
            let zoom = test_zoom as f64;
            let nw = bounds.north_west.project(zoom);
            let se = bounds.south_east.project(zoom);

            let bounds_width = (se.x - nw.x).abs();
            let bounds_height = (se.y - nw.y).abs();

            if bounds_width <= width && bounds_height <= height {
                best_zoom = test_zoom;
                break;
            }
        }

        let zoom = best_zoom as f64;
        let middle = bounds
            .north_west
            .project(zoom)
            .midpoint(&bounds.south_east.project(zoom));
        let center = LatLng::unproject(&middle, zoom);

        log::debug!(
            "fitted bounds N{:.4} W{:.4} S{:.4} E{:.4} into {}x{}: center ({:.4}, {:.4}) zoom {}",
            bounds.north(),
            bounds.west(),
            bounds.south(),
            bounds.east(),
            size.width,
            size.height,
            center.lat,
            center.lng,
            best_zoom
        );

        Ok(Viewport::new(center, best_zoom))
    }
}
