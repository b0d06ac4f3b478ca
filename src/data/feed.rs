//! Station feed records
//!
//! The public EPA feed is a JSON document with a `feeds` array. Numeric fields
//! arrive either as JSON numbers or as strings (sometimes empty), so records
//! are first read loosely and then converted into [`StationReading`]s.

use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Air-quality category reported by the feed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AirStatus {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    /// A label outside the four known categories, kept verbatim
    Other(String),
}

impl AirStatus {
    /// The known categories, in display order
    pub const KNOWN: [AirStatus; 4] = [
        AirStatus::Good,
        AirStatus::Moderate,
        AirStatus::UnhealthyForSensitiveGroups,
        AirStatus::Unhealthy,
    ];

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "良好" => Self::Good,
            "普通" => Self::Moderate,
            "對敏感族群不健康" => Self::UnhealthyForSensitiveGroups,
            "對所有族群不健康" => Self::Unhealthy,
            other => Self::Other(other.to_string()),
        }
    }

    /// Label as the feed spells it
    pub fn label(&self) -> &str {
        match self {
            Self::Good => "良好",
            Self::Moderate => "普通",
            Self::UnhealthyForSensitiveGroups => "對敏感族群不健康",
            Self::Unhealthy => "對所有族群不健康",
            Self::Other(label) => label,
        }
    }

    pub fn emoji(&self) -> Option<&'static str> {
        match self {
            Self::Good => Some("🙂"),
            Self::Moderate => Some("😐"),
            Self::UnhealthyForSensitiveGroups => Some("😷"),
            Self::Unhealthy => Some("🤢"),
            Self::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for AirStatus {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<AirStatus> for String {
    fn from(status: AirStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for AirStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One monitoring station's latest measurement. Never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    pub site_name: String,
    pub position: LatLng,
    pub status: AirStatus,
    pub aqi: Option<f64>,
    pub pm2_5: Option<f64>,
    pub county: String,
    pub publish_time: String,
}

impl StationReading {
    /// Site names are unique within a feed and double as station ids.
    pub fn id(&self) -> &str {
        &self.site_name
    }
}

/// A feed record as it appears on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawStation {
    #[serde(rename = "SiteName", default)]
    pub site_name: String,
    #[serde(rename = "Latitude", default)]
    pub latitude: Value,
    #[serde(rename = "Longitude", default)]
    pub longitude: Value,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "AQI", default)]
    pub aqi: Value,
    #[serde(rename = "PM2_5", default)]
    pub pm2_5: Value,
    #[serde(rename = "County", default)]
    pub county: String,
    #[serde(rename = "PublishTime", default)]
    pub publish_time: Value,
}

/// Top-level feed document
#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub feeds: Vec<RawStation>,
}

impl TryFrom<RawStation> for StationReading {
    type Error = MapError;

    fn try_from(raw: RawStation) -> Result<Self> {
        let lat = required_number(&raw, "Latitude", &raw.latitude)?;
        let lng = required_number(&raw, "Longitude", &raw.longitude)?;
        let position = LatLng::new(lat, lng);
        if !position.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "station {:?} at ({}, {})",
                raw.site_name, lat, lng
            )));
        }

        Ok(Self {
            position,
            status: AirStatus::from_label(&raw.status),
            aqi: loose_number(&raw.aqi),
            pm2_5: loose_number(&raw.pm2_5),
            publish_time: loose_text(&raw.publish_time),
            site_name: raw.site_name,
            county: raw.county,
        })
    }
}

/// Reads a number that may be encoded as a JSON number or a numeric string.
fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn loose_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn required_number(raw: &RawStation, field: &str, value: &Value) -> Result<f64> {
    loose_number(value).ok_or_else(|| {
        MapError::ParseError(format!(
            "station {:?}: {} is not a number ({})",
            raw.site_name, field, value
        ))
    })
}

/// Parses a feed document, failing on the first malformed record.
pub fn parse_feed(json: &str) -> Result<Vec<StationReading>> {
    let document: FeedDocument = serde_json::from_str(json)?;
    document
        .feeds
        .into_iter()
        .map(StationReading::try_from)
        .collect()
}

/// Parses a feed document, skipping records that cannot be read.
pub fn parse_feed_lenient(json: &str) -> Result<Vec<StationReading>> {
    let document: FeedDocument = serde_json::from_str(json)?;
    let total = document.feeds.len();

    let readings: Vec<StationReading> = document
        .feeds
        .into_iter()
        .filter_map(|raw| match StationReading::try_from(raw) {
            Ok(reading) => Some(reading),
            Err(e) => {
                log::warn!("skipping feed record: {}", e);
                None
            }
        })
        .collect();

    if readings.len() < total {
        log::info!("kept {} of {} feed records", readings.len(), total);
    }
    Ok(readings)
}

/// The known categories in display order, each with its readings in feed order.
pub fn group_by_status(readings: &[StationReading]) -> Vec<(AirStatus, Vec<&StationReading>)> {
    AirStatus::KNOWN
        .iter()
        .map(|status| {
            let members = readings.iter().filter(|r| &r.status == status).collect();
            (status.clone(), members)
        })
        .collect()
}

/// Looks a reading up by its station id.
pub fn find_station<'a>(readings: &'a [StationReading], id: &str) -> Option<&'a StationReading> {
    readings.iter().find(|r| r.id() == id)
}

pub fn positions(readings: &[StationReading]) -> Vec<LatLng> {
    readings.iter().map(|r| r.position).collect()
}
