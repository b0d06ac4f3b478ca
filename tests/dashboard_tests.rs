use aqmap::prelude::*;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// End-to-end scenarios: feed source -> dashboard state -> fitted viewport
#[cfg(test)]
mod dashboard_tests {
    use super::*;

    const FEED: &str = r#"{
        "feeds": [
            {"SiteName": "北站", "Latitude": "25.0", "Longitude": "121.5", "Status": "良好",
             "AQI": "35", "PM2_5": "9", "County": "臺北市", "PublishTime": "2019-03-04 10:00"},
            {"SiteName": "中站", "Latitude": 24.0, "Longitude": 120.5, "Status": "普通",
             "AQI": 72, "PM2_5": 23, "County": "彰化縣", "PublishTime": "2019-03-04 10:00"},
            {"SiteName": "南站", "Latitude": "22.9", "Longitude": "120.2", "Status": "對敏感族群不健康",
             "AQI": "118", "PM2_5": "41", "County": "臺南市", "PublishTime": "2019-03-04 10:00"},
            {"SiteName": "壞站", "Latitude": "", "Longitude": "", "Status": "設備維護"}
        ]
    }"#;

    /// Serves `body` once over HTTP/1.1 on a random local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/data/last-all-epa.json", addr)
    }

    #[tokio::test]
    async fn test_static_source_to_all_stations_view() {
        let source = StaticFeedSource::from_json(FEED).unwrap();
        let feed = load_feed(&source).await;
        assert_eq!(feed.readings().len(), 3);

        let mut state = DashboardState::new(&DashboardConfig::default());
        state.apply_feed(feed, &NoGeolocation);
        state.toggle_view().unwrap();

        let view = state.map_view();
        assert!((view.viewport.center.lat - 23.95).abs() < 0.05);
        assert!((view.viewport.center.lng - 120.85).abs() < 0.01);
        for site in &view.sites {
            assert!(view.viewport.contains(&site.position, MapSize::new(436, 747)));
        }
    }

    #[tokio::test]
    async fn test_http_source_fetches_feed() {
        let url = serve_once("HTTP/1.1 200 OK", FEED).await;
        let source = HttpFeedSource::new(url).with_timeout(Duration::from_secs(5));

        let feed = load_feed(&source).await;
        let names: Vec<&str> = feed.readings().iter().map(|r| r.site_name.as_str()).collect();
        assert_eq!(names, vec!["北站", "中站", "南站"]);
    }

    #[tokio::test]
    async fn test_http_error_status_is_failure() {
        let url = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;
        let source = HttpFeedSource::new(url).with_timeout(Duration::from_secs(5));

        let feed = load_feed(&source).await;
        assert!(feed.is_failed());
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_failure_not_pending() {
        // Bind then drop to get a port nobody listens on
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let source = HttpFeedSource::new(format!("http://{}/feed.json", addr))
            .with_timeout(Duration::from_secs(2));

        let mut state = DashboardState::new(&DashboardConfig::default());
        assert!(state.feed().is_pending());

        state.apply_feed(load_feed(&source).await, &NoGeolocation);
        assert!(state.feed().is_failed());
        assert!(render_panel(&state).contains("station feed unavailable"));
    }

    #[tokio::test]
    async fn test_empty_feed_is_failure() {
        let source = StaticFeedSource::from_json(r#"{"feeds": []}"#).unwrap();
        assert!(load_feed(&source).await.is_failed());
    }

    #[test]
    fn test_every_station_stays_inside_fitted_view() {
        let readings = parse_feed_lenient(FEED).unwrap();
        let fitter = ViewportFitter::default();
        let size = MapSize::new(436, 747);

        for n in 1..=readings.len() {
            let points: Vec<LatLng> = readings[..n].iter().map(|r| r.position).collect();
            let bounds = LatLngBounds::from_points(&points).unwrap();
            let viewport = fitter.fit(&points, size).unwrap();

            for p in &points {
                assert!(bounds.contains(p));
                assert!(viewport.contains(p, size));
            }
        }
    }

    #[test]
    fn test_nearest_station_with_device_position() {
        let readings = parse_feed_lenient(FEED).unwrap();
        let mut state = DashboardState::new(&DashboardConfig::default());
        state.apply_feed(
            FeedState::Loaded(readings),
            &FixedPosition(LatLng::new(25.04, 121.52)),
        );

        assert_eq!(state.home_station().unwrap().site_name, "北站");
        assert_eq!(state.sites().len(), 1);
        assert_eq!(state.viewport().zoom, 11);
    }
}
