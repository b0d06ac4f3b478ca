use serde::{Deserialize, Serialize};

/// Light or dark page and map appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn style(self) -> MapStyle {
        match self {
            Self::Light => MapThemes::light(),
            Self::Dark => MapThemes::dark(),
        }
    }
}

/// A single color override handed to the map widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRule {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub feature_type: Option<String>,
    pub element_type: String,
    pub stylers: Vec<Styler>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Styler {
    pub color: String,
}

impl StyleRule {
    fn new(feature_type: Option<&str>, element_type: &str, color: &str) -> Self {
        Self {
            feature_type: feature_type.map(str::to_string),
            element_type: element_type.to_string(),
            stylers: vec![Styler {
                color: color.to_string(),
            }],
        }
    }
}

/// Style configuration for the page and the map widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStyle {
    /// Page background color
    pub background_color: String,
    /// Page text color
    pub text_color: String,
    /// Accent for hovered and selected station tags
    pub accent_color: String,
    /// Map widget overrides; empty means the widget's own look
    pub map_rules: Vec<StyleRule>,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            text_color: "#4d4d4d".to_string(),
            accent_color: "#ff9800".to_string(),
            map_rules: Vec::new(),
        }
    }
}

/// Predefined themes for different map styles
pub struct MapThemes;

impl MapThemes {
    /// Light theme (default)
    pub fn light() -> MapStyle {
        MapStyle::default()
    }

    /// Dark theme for night mode
    pub fn dark() -> MapStyle {
        let rule = StyleRule::new;
        MapStyle {
            background_color: "black".to_string(),
            text_color: "white".to_string(),
            map_rules: vec![
                rule(None, "geometry", "#242f3e"),
                rule(None, "labels.text.stroke", "#242f3e"),
                rule(None, "labels.text.fill", "#746855"),
                rule(Some("administrative.locality"), "labels.text.fill", "#d59563"),
                rule(Some("poi"), "labels.text.fill", "#d59563"),
                rule(Some("poi.park"), "geometry", "#263c3f"),
                rule(Some("poi.park"), "labels.text.fill", "#6b9a76"),
                rule(Some("road"), "geometry", "#38414e"),
                rule(Some("road"), "geometry.stroke", "#212a37"),
                rule(Some("road"), "labels.text.fill", "#9ca5b3"),
                rule(Some("road.highway"), "geometry", "#746855"),
                rule(Some("road.highway"), "geometry.stroke", "#1f2835"),
                rule(Some("road.highway"), "labels.text.fill", "#f3d19c"),
                rule(Some("transit"), "geometry", "#2f3948"),
                rule(Some("transit.station"), "labels.text.fill", "#d59563"),
                rule(Some("water"), "geometry", "#17263c"),
                rule(Some("water"), "labels.text.fill", "#515c6d"),
                rule(Some("water"), "labels.text.stroke", "#17263c"),
            ],
            ..MapStyle::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles() {
        let style = MapThemes::light();
        assert_eq!(style.background_color, "white");
        assert!(style.map_rules.is_empty());
    }

    #[test]
    fn test_dark_theme() {
        let dark = DisplayMode::Dark.style();
        assert_eq!(dark.text_color, "white");
        assert_eq!(dark.map_rules.len(), 18);
        assert_eq!(dark.map_rules[0].stylers[0].color, "#242f3e");
    }

    #[test]
    fn test_dark_rules_serialize_for_widget() {
        let dark = MapThemes::dark();
        let json = serde_json::to_value(&dark.map_rules[3]).unwrap();
        assert_eq!(json["featureType"], "administrative.locality");
        assert_eq!(json["elementType"], "labels.text.fill");
        assert_eq!(json["stylers"][0]["color"], "#d59563");

        let first = serde_json::to_value(&dark.map_rules[0]).unwrap();
        assert!(first.get("featureType").is_none());
    }

    #[test]
    fn test_toggle() {
        assert_eq!(DisplayMode::Light.toggled(), DisplayMode::Dark);
        assert_eq!(DisplayMode::Dark.toggled().toggled(), DisplayMode::Dark);
    }
}
