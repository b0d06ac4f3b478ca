use anyhow::{bail, Context, Result};
use aqmap::prelude::*;
use std::path::PathBuf;

/// Headless dashboard: fetches the station feed once and prints what the page
/// would show in both views.
#[tokio::main]
async fn main() -> Result<()> {
    aqmap::init_logging();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = DashboardConfig::load(args.config.as_deref()).context("loading configuration")?;

    let mut state = DashboardState::new(&config);
    println!("{}", render_panel(&state));

    let source = HttpFeedSource::from_config(&config).context("building feed client")?;
    println!("fetching stations from {}", source.url());
    let feed = load_feed(&source).await;

    let geolocation: Box<dyn GeolocationProvider> = match args.position {
        Some(position) => Box::new(FixedPosition(position)),
        None => Box::new(NoGeolocation),
    };
    state.apply_feed(feed, geolocation.as_ref());

    if args.dark {
        state.toggle_display_mode();
    }

    print_view(&state);
    if state.feed().is_failed() {
        bail!("no station data available");
    }

    state.toggle_view().context("fitting all stations")?;
    print_view(&state);

    if let Some(id) = args.select {
        state
            .select_station(&id)
            .with_context(|| format!("selecting station {}", id))?;
        print_view(&state);
    }

    Ok(())
}

fn print_view(state: &DashboardState) {
    let view = state.map_view();
    let size = state.map_size();
    println!(
        "map {}x{}: center ({:.5}, {:.5}) zoom {}, {} marker(s), {} style rule(s)",
        size.width,
        size.height,
        view.viewport.center.lat,
        view.viewport.center.lng,
        view.viewport.zoom,
        view.sites.len(),
        view.style.map_rules.len()
    );
    let visible = view.viewport.bounds(size);
    println!(
        "visible N{:.4} W{:.4} S{:.4} E{:.4}",
        visible.north(),
        visible.west(),
        visible.south(),
        visible.east()
    );
    println!("{}", render_panel(state));
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    position: Option<LatLng>,
    select: Option<String>,
    dark: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--at" => {
                    let value = args.next().context("--at needs LAT,LNG")?;
                    parsed.position = Some(parse_position(&value)?);
                }
                "--select" => {
                    parsed.select = Some(args.next().context("--select needs a station name")?);
                }
                "--dark" => parsed.dark = true,
                other if other.starts_with("--") => bail!("unknown option {}", other),
                path => parsed.config = Some(PathBuf::from(path)),
            }
        }
        Ok(parsed)
    }
}

fn parse_position(value: &str) -> Result<LatLng> {
    let (lat, lng) = value
        .split_once(',')
        .with_context(|| format!("expected LAT,LNG, got {:?}", value))?;
    let position = LatLng::new(
        lat.trim().parse().context("latitude")?,
        lng.trim().parse().context("longitude")?,
    );
    if !position.is_valid() {
        bail!("position {:?} is out of range", value);
    }
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["dash.json", "--at", "25.03, 121.56", "--select", "中山", "--dark"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("dash.json")));
        assert_eq!(parsed.position, Some(LatLng::new(25.03, 121.56)));
        assert_eq!(parsed.select.as_deref(), Some("中山"));
        assert!(parsed.dark);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["--at"]).is_err());
        assert!(args(&["--at", "north"]).is_err());
        assert!(args(&["--at", "95,121"]).is_err());
        assert!(args(&["--verbose"]).is_err());
    }
}
