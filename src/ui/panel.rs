//! Text projections of the side panel
//!
//! Labels are the dashboard's Traditional Chinese captions. Rendering is plain text so the same
//! output works for terminals, logs and snapshot tests.

use crate::data::feed::{AirStatus, StationReading};
use crate::ui::state::{DashboardState, ViewMode};
use crate::ui::style::DisplayMode;
use std::fmt::Write;

/// Caption of the view toggle: names the view the button switches *to*.
pub fn view_button_label(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Home => "顯示所有觀測站",
        ViewMode::AllStations => "顯示最近觀測站",
    }
}

/// Caption of the display mode toggle
pub fn mode_button_label(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Light => "DARK MODE",
        DisplayMode::Dark => "LIGHT MODE",
    }
}

/// Emoji plus label; empty for unknown categories.
pub fn status_heading(status: &AirStatus) -> String {
    match status.emoji() {
        Some(emoji) => format!("{}{}", emoji, status.label()),
        None => String::new(),
    }
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}

/// Location, timestamp, PM2.5 and AQI lines of the detail panel
pub fn detail_lines(reading: &StationReading) -> Vec<String> {
    vec![
        format!("位置：{}", reading.county),
        format!("更新時間：{}", reading.publish_time),
        format!("PM 2.5：{}", format_value(reading.pm2_5)),
        format!("AQI：{}", format_value(reading.aqi)),
    ]
}

fn tag(name: &str, highlighted: bool) -> String {
    if highlighted {
        format!("<{}>", name)
    } else {
        format!("[{}]", name)
    }
}

/// Renders the whole side panel for the current state.
pub fn render_panel(state: &DashboardState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} | {}",
        view_button_label(state.view_mode()),
        mode_button_label(state.display_mode())
    );

    if state.feed().is_pending() {
        let _ = writeln!(out, "loading stations...");
        return out;
    }
    if let crate::data::fetch::FeedState::Failed(reason) = state.feed() {
        let _ = writeln!(out, "station feed unavailable: {}", reason);
        return out;
    }

    match state.view_mode() {
        ViewMode::Home => {
            if let Some(home) = state.home_station() {
                let _ = writeln!(out, "{}", status_heading(&home.status));
                let _ = writeln!(out, "{}", tag(&home.site_name, true));
                for line in detail_lines(home) {
                    let _ = writeln!(out, "  {}", line);
                }
            }
        }
        ViewMode::AllStations => {
            let selected = state.selected_station();
            for (status, members) in state.groups() {
                let _ = writeln!(out, "{}", status_heading(&status));
                let tags: Vec<String> = members
                    .iter()
                    .map(|r| tag(&r.site_name, state.is_selected(r.id())))
                    .collect();
                if !tags.is_empty() {
                    let _ = writeln!(out, "{}", tags.join(" "));
                }
                if let Some(reading) = selected.filter(|r| r.status == status) {
                    for line in detail_lines(reading) {
                        let _ = writeln!(out, "  {}", line);
                    }
                }
            }
        }
    }

    out
}
