//! Integration tests for the HTTP providers using wiremock.

use shoreline_core::{ForecastConfig, MarineConfig, WeatherConfig};
use shoreline_weather::{
    Coordinates, ForecastIcon, ForecastProvider, GeolocationOptions, IpLocation, LocationError,
    LocationProvider, MarineProvider, Measurement, TideStatus, WeatherError, WeatherProvider,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn beach() -> Coordinates {
    Coordinates::new(1.30, 103.80)
}

fn weather_provider(server: &MockServer) -> WeatherProvider {
    WeatherProvider::new(&WeatherConfig {
        api_key: "test-key".to_string(),
        base_url: server.uri(),
    })
    .unwrap()
}

fn marine_provider(server: &MockServer) -> MarineProvider {
    MarineProvider::new(&MarineConfig {
        api_key: "marine-key".to_string(),
        base_url: server.uri(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_current_weather_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "1.3"))
        .and(query_param("lon", "103.8"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": { "temp": 30.2, "humidity": 70 },
            "weather": [{ "description": "scattered clouds", "icon": "03d" }],
            "wind": { "speed": 5 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let snapshot = weather_provider(&mock_server)
        .fetch_current(&beach())
        .await
        .unwrap();

    assert_eq!(snapshot.temperature_c, 30.2);
    assert_eq!(snapshot.description, "scattered clouds");
    assert_eq!(snapshot.humidity_pct, 70);
    assert_eq!(snapshot.icon_ref, "03d");
}

#[tokio::test]
async fn test_current_weather_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&mock_server)
        .await;

    let result = weather_provider(&mock_server).fetch_current(&beach()).await;

    match result {
        Err(WeatherError::Status { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_current_weather_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = weather_provider(&mock_server).fetch_current(&beach()).await;
    assert!(matches!(result, Err(WeatherError::Parse(_))));
}

#[tokio::test]
async fn test_uv_index_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/uvi"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lat": 1.3, "lon": 103.8, "value": 7.5
        })))
        .mount(&mock_server)
        .await;

    let uv = weather_provider(&mock_server)
        .fetch_uv_index(&beach())
        .await
        .unwrap();
    assert_eq!(uv, 7.5);
}

#[tokio::test]
async fn test_marine_conditions_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather/point"))
        .and(header("Authorization", "marine-key"))
        .and(query_param("lng", "103.8"))
        .and(query_param("params", "waveHeight,waterTemperature,currentSpeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hours": [
                {
                    "time": "2026-10-19T00:00:00+00:00",
                    "waveHeight": { "noaa": 0.8 },
                    "waterTemperature": { "noaa": 29.1 },
                    "currentSpeed": { "noaa": 0.2 }
                },
                {
                    "time": "2026-10-19T01:00:00+00:00",
                    "waveHeight": { "noaa": 2.5 },
                    "waterTemperature": { "noaa": 20.0 },
                    "currentSpeed": { "noaa": 1.2 }
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let conditions = marine_provider(&mock_server).fetch_conditions(&beach()).await;

    assert_eq!(conditions.wave_height_m, Measurement::Value(0.8));
    assert_eq!(conditions.water_temp_c, Measurement::Value(29.1));
    assert_eq!(conditions.tide_status, TideStatus::Slack);
}

#[tokio::test]
async fn test_marine_missing_wave_height() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather/point"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hours": [{
                "waveHeight": {},
                "waterTemperature": { "noaa": 29.1 },
                "currentSpeed": { "noaa": 0.9 }
            }]
        })))
        .mount(&mock_server)
        .await;

    let conditions = marine_provider(&mock_server).fetch_conditions(&beach()).await;

    assert_eq!(conditions.wave_height_m, Measurement::Unavailable);
    assert_eq!(conditions.wave_height_m.to_string(), "N/A");
    assert_eq!(conditions.water_temp_c, Measurement::Value(29.1));
    assert_eq!(conditions.tide_status, TideStatus::Rising);
}

#[tokio::test]
async fn test_marine_server_error_is_absorbed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather/point"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let conditions = marine_provider(&mock_server).fetch_conditions(&beach()).await;

    assert!(!conditions.wave_height_m.is_available());
    assert!(!conditions.water_temp_c.is_available());
    assert_eq!(conditions.tide_status, TideStatus::Unavailable);
}

#[tokio::test]
async fn test_marine_empty_hours_is_absorbed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather/point"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "hours": [] })))
        .mount(&mock_server)
        .await;

    let conditions = marine_provider(&mock_server).fetch_conditions(&beach()).await;
    assert_eq!(conditions.tide_status, TideStatus::Unavailable);
}

fn outlook_entry(date: &str, forecast: &str) -> serde_json::Value {
    serde_json::json!({
        "date": date,
        "timestamp": format!("{}T00:00:00+08:00", date),
        "forecast": forecast,
        "relative_humidity": { "low": 60, "high": 95 },
        "temperature": { "low": 25, "high": 33 },
        "wind": { "speed": { "low": 10, "high": 20 }, "direction": "NNE" }
    })
}

#[tokio::test]
async fn test_forecast_takes_four_days() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/4-day-weather-forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{
                "update_timestamp": "2026-10-19T05:30:00+08:00",
                "forecasts": [
                    outlook_entry("2026-10-20", "Afternoon thunderstorms"),
                    outlook_entry("2026-10-21", "Passing showers"),
                    outlook_entry("2026-10-22", "Partly cloudy"),
                    outlook_entry("2026-10-23", "Fair and warm"),
                    outlook_entry("2026-10-24", "Windy")
                ]
            }]
        })))
        .mount(&mock_server)
        .await;

    let provider = ForecastProvider::new(&ForecastConfig {
        enabled: true,
        base_url: mock_server.uri(),
    })
    .unwrap();
    let days = provider.fetch_outlook().await.unwrap();

    assert_eq!(days.len(), 4);
    assert_eq!(days[0].icon(), ForecastIcon::Thunder);
    assert_eq!(days[1].icon(), ForecastIcon::Showers);
    assert_eq!(days[2].icon(), ForecastIcon::Cloudy);
    assert_eq!(days[3].icon(), ForecastIcon::Fair);
}

#[tokio::test]
async fn test_forecast_empty_items_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/4-day-weather-forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&mock_server)
        .await;

    let provider = ForecastProvider::new(&ForecastConfig {
        enabled: true,
        base_url: mock_server.uri(),
    })
    .unwrap();

    assert!(matches!(
        provider.fetch_outlook().await,
        Err(WeatherError::Parse(_))
    ));
}

#[tokio::test]
async fn test_ip_location_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.7",
            "city": "Singapore",
            "latitude": 1.2897,
            "longitude": 103.8501
        })))
        .mount(&mock_server)
        .await;

    let provider = IpLocation::new(format!("{}/json/", mock_server.uri())).unwrap();
    let coords = provider
        .current_location(&GeolocationOptions::default())
        .await
        .unwrap();

    assert_eq!(coords, Coordinates::new(1.2897, 103.8501));
}

#[tokio::test]
async fn test_ip_location_forbidden_is_permission_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let provider = IpLocation::new(format!("{}/json/", mock_server.uri())).unwrap();
    let result = provider
        .current_location(&GeolocationOptions::default())
        .await;

    assert!(matches!(result, Err(LocationError::PermissionDenied)));
}
