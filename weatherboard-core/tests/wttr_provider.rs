//! Integration tests for `WttrProvider` against a local wiremock server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weatherboard_core::{LookupError, WeatherProvider, WttrProvider};

fn test_provider(server: &MockServer) -> WttrProvider {
    WttrProvider::new(&server.uri(), Duration::from_secs(5)).expect("failed to build test provider")
}

fn tokyo_json() -> serde_json::Value {
    json!({
        "current_condition": [{
            "temp_C": "27",
            "humidity": "81",
            "windspeedKmph": "9",
            "precipMM": "1.2",
            "weatherDesc": [{ "value": "Patchy rain nearby" }],
            "weatherIconUrl": [{ "value": "https://cdn.example/patchy.png" }]
        }],
        "nearest_area": [{ "areaName": [{ "value": "Tokyo" }] }]
    })
}

#[tokio::test]
async fn fetch_weather_maps_payload_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Tokyo"))
        .and(query_param("format", "j1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tokyo_json()))
        .expect(1)
        .mount(&server)
        .await;

    let snap = test_provider(&server).fetch_weather("Tokyo").await.unwrap();

    assert_eq!(snap.location, "Tokyo");
    assert_eq!(snap.temperature_c, 27);
    assert_eq!(snap.humidity_pct, 81);
    assert_eq!(snap.wind_speed_kmh, 9);
    assert!((snap.precipitation_mm - 1.2).abs() < f64::EPSILON);
    assert_eq!(snap.condition, "Patchy rain nearby");
    assert_eq!(snap.icon_url, "https://cdn.example/patchy.png");
}

#[tokio::test]
async fn fetch_weather_trims_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Tokyo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tokyo_json()))
        .expect(1)
        .mount(&server)
        .await;

    let snap = test_provider(&server).fetch_weather("  Tokyo ").await.unwrap();
    assert_eq!(snap.location, "Tokyo");
}

#[tokio::test]
async fn empty_payload_degrades_to_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Nowhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let snap = test_provider(&server).fetch_weather("Nowhere").await.unwrap();

    assert_eq!(snap.location, "Unknown");
    assert_eq!(snap.condition, "Unknown");
    assert_eq!(snap.temperature_c, 0);
    assert_eq!(snap.humidity_pct, 0);
    assert_eq!(snap.wind_speed_kmh, 0);
    assert_eq!(snap.precipitation_mm, 0.0);
}

#[tokio::test]
async fn not_found_is_a_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Atlantis"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Unknown location"))
        .mount(&server)
        .await;

    let err = test_provider(&server).fetch_weather("Atlantis").await.unwrap_err();

    match err {
        LookupError::Status { place, status, body } => {
            assert_eq!(place, "Atlantis");
            assert_eq!(status, 404);
            assert_eq!(body, "Unknown location");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = test_provider(&server).fetch_weather("Paris").await.unwrap_err();
    assert!(matches!(err, LookupError::Parse { .. }), "got {err:?}");
}

#[tokio::test]
async fn blank_place_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tokyo_json()))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_provider(&server).fetch_weather("").await.unwrap_err();
    assert!(matches!(err, LookupError::EmptyPlace));
}

#[tokio::test]
async fn slow_upstream_hits_client_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Moscow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tokyo_json())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let provider = WttrProvider::new(&server.uri(), Duration::from_millis(200)).unwrap();
    let err = provider.fetch_weather("Moscow").await.unwrap_err();

    match err {
        LookupError::Request { source, .. } => assert!(source.is_timeout()),
        other => panic!("expected request error, got {other:?}"),
    }
}
