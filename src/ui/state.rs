//! Dashboard view state
//!
//! The page has exactly one display mode, one view mode and one detail mode
//! active at a time. Everything the page shows is derived from these plus the
//! immutable list of readings obtained from the feed.

use crate::core::config::DashboardConfig;
use crate::core::geo::LatLng;
use crate::core::viewport::{MapSize, Viewport, ViewportFitter};
use crate::data::feed::{find_station, group_by_status, positions, AirStatus, StationReading};
use crate::data::fetch::FeedState;
use crate::location::{nearest_station, reference_point, GeolocationProvider};
use crate::ui::style::{DisplayMode, MapStyle};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Which stations the map shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Only the station nearest to the user
    #[default]
    Home,
    /// Every station, grouped by status in the side panel
    AllStations,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Home => Self::AllStations,
            Self::AllStations => Self::Home,
        }
    }
}

/// Whether a station's detail panel is open, and for which station
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetailMode {
    #[default]
    Hidden,
    Shown(String),
}

/// Everything the map widget needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct MapView<'a> {
    pub viewport: Viewport,
    pub sites: Vec<&'a StationReading>,
    pub style: MapStyle,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    feed: FeedState,
    home_station: Option<String>,
    display: DisplayMode,
    view: ViewMode,
    detail: DetailMode,
    viewport: Viewport,
    fitter: ViewportFitter,
    map_size: MapSize,
    default_center: LatLng,
}

impl DashboardState {
    /// State before the feed arrives: no stations, default region view.
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            feed: FeedState::Pending,
            home_station: None,
            display: if config.dark_mode {
                DisplayMode::Dark
            } else {
                DisplayMode::Light
            },
            view: ViewMode::Home,
            detail: DetailMode::Hidden,
            viewport: config.default_viewport(),
            fitter: config.fitter(),
            map_size: config.map_size(),
            default_center: config.default_center,
        }
    }

    /// Records the fetch outcome and focuses the home view on the station
    /// nearest to the device (or to the default region center).
    pub fn apply_feed(&mut self, feed: FeedState, geolocation: &dyn GeolocationProvider) {
        let origin = reference_point(geolocation, self.default_center);
        self.home_station = nearest_station(feed.readings(), &origin).map(|r| r.id().to_string());
        self.feed = feed;
        self.view = ViewMode::Home;
        self.detail = DetailMode::Hidden;

        let home = self.home_station().map(|h| {
            log::info!("home station is {} ({})", h.site_name, h.county);
            h.position
        });
        if let Some(position) = home {
            self.viewport = self.fitter.focus(position);
        }
    }

    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    pub fn readings(&self) -> &[StationReading] {
        self.feed.readings()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn detail(&self) -> &DetailMode {
        &self.detail
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn map_size(&self) -> MapSize {
        self.map_size
    }

    pub fn home_station(&self) -> Option<&StationReading> {
        self.home_station
            .as_deref()
            .and_then(|id| find_station(self.readings(), id))
    }

    pub fn selected_station(&self) -> Option<&StationReading> {
        match &self.detail {
            DetailMode::Shown(id) => find_station(self.readings(), id),
            DetailMode::Hidden => None,
        }
    }

    /// True when `id`'s tag should be drawn highlighted
    pub fn is_selected(&self, id: &str) -> bool {
        matches!(&self.detail, DetailMode::Shown(selected) if selected == id)
    }

    pub fn toggle_display_mode(&mut self) {
        self.display = self.display.toggled();
        log::debug!("display mode is now {:?}", self.display);
    }

    /// Switches between the nearest-station and all-stations views. The map is
    /// refitted to the stations of the new view and the detail panel closes.
    ///
    /// Home always returns to the nearest station, even after another station
    /// was selected in the all-stations view; the selection is not carried over.
    pub fn toggle_view(&mut self) -> Result<()> {
        let next = self.view.toggled();

        match next {
            ViewMode::AllStations => {
                let points = positions(self.readings());
                if !points.is_empty() {
                    self.viewport = self.fitter.fit(&points, self.map_size)?;
                }
            }
            ViewMode::Home => {
                if let Some(position) = self.home_station().map(|h| h.position) {
                    self.viewport = self.fitter.focus(position);
                }
            }
        }

        self.view = next;
        self.detail = DetailMode::Hidden;
        log::debug!(
            "view is now {:?} at ({:.4}, {:.4}) zoom {}",
            self.view,
            self.viewport.center.lat,
            self.viewport.center.lng,
            self.viewport.zoom
        );
        Ok(())
    }

    /// Focuses the map on one station and opens its detail panel.
    ///
    /// Station tags exist only in the all-stations view.
    pub fn select_station(&mut self, id: &str) -> Result<()> {
        if self.view != ViewMode::AllStations {
            return Err(MapError::InvalidInput(
                "stations can only be selected in the all-stations view".to_string(),
            ));
        }
        let position = find_station(self.readings(), id)
            .map(|s| s.position)
            .ok_or_else(|| MapError::UnknownStation(id.to_string()))?;

        self.viewport = self.fitter.focus(position);
        self.detail = DetailMode::Shown(id.to_string());
        Ok(())
    }

    /// Stations drawn as markers in the current view
    pub fn sites(&self) -> Vec<&StationReading> {
        match self.view {
            ViewMode::Home => self.home_station().into_iter().collect(),
            ViewMode::AllStations => self.readings().iter().collect(),
        }
    }

    pub fn groups(&self) -> Vec<(AirStatus, Vec<&StationReading>)> {
        group_by_status(self.readings())
    }

    pub fn map_view(&self) -> MapView<'_> {
        MapView {
            viewport: self.viewport,
            sites: self.sites(),
            style: self.display.style(),
        }
    }
}
