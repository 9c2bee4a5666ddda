//! Integration tests for the provider clients using wiremock.

use std::time::Duration;

use skycast_weather::{
    AirQualityClient, ApiClient, Coordinates, GeocodingClient, NewsClient, ProviderError,
    WeatherClient, DEFAULT_TIMEOUT,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LONDON: Coordinates = Coordinates {
    latitude: 51.5074,
    longitude: -0.1278,
};

fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Some("test-key"), DEFAULT_TIMEOUT).unwrap()
}

/// Helper to create a current-weather JSON body
fn current_weather(temp: f64) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lat": 51.5074, "lon": -0.1278},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": temp, "feels_like": 14.6, "humidity": 72, "pressure": 1012},
        "visibility": 10000,
        "wind": {"speed": 4.1, "deg": 240},
        "sys": {"country": "GB", "sunrise": 1709275320, "sunset": 1709315100},
        "timezone": 0,
        "name": "London"
    })
}

/// Helper to create a forecast slot JSON
fn forecast_slot(dt: i64, dt_txt: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "dt": dt,
        "dt_txt": dt_txt,
        "main": {"temp": temp},
        "weather": [{"icon": "10d", "description": "light rain"}]
    })
}

#[tokio::test]
async fn test_current_weather_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5074"))
        .and(query_param("lon", "-0.1278"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather(15.3)))
        .mount(&server)
        .await;

    let client = WeatherClient::new(api(&server));
    let snapshot = client.fetch_current_weather(&LONDON).await.unwrap();

    assert_eq!(snapshot.temperature_c, 15.3);
    assert_eq!(snapshot.condition_label, "Clouds");
    assert_eq!(snapshot.humidity_pct, 72);
    assert_eq!(snapshot.pressure_hpa, 1012);
    assert_eq!(snapshot.visibility_m, 10000);
    assert_eq!(snapshot.sunrise_epoch, 1709275320);
    assert_eq!(snapshot.place_name.as_deref(), Some("London, GB"));
}

#[tokio::test]
async fn test_current_weather_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London,GB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather(9.0)))
        .mount(&server)
        .await;

    let client = WeatherClient::new(api(&server));
    let snapshot = client
        .fetch_current_weather_by_name(" London,GB ")
        .await
        .unwrap();

    assert_eq!(snapshot.latitude, 51.5074);
    assert_eq!(snapshot.longitude, -0.1278);
}

#[tokio::test]
async fn test_current_weather_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404", "message": "city not found"
        })))
        .mount(&server)
        .await;

    let client = WeatherClient::new(api(&server));
    let result = client.fetch_current_weather_by_name("Atlantis").await;

    assert_eq!(result.unwrap_err(), ProviderError::NotFound);
}

#[tokio::test]
async fn test_current_weather_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = WeatherClient::new(api(&server));
    let result = client.fetch_current_weather(&LONDON).await;

    assert_eq!(result.unwrap_err(), ProviderError::Unauthorized);
}

#[tokio::test]
async fn test_current_weather_timeout_is_not_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_weather(15.3))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let slow = ApiClient::new(&server.uri(), Some("k"), Duration::from_millis(50)).unwrap();
    let client = WeatherClient::new(slow);
    let result = client.fetch_current_weather(&LONDON).await;

    assert_eq!(result.unwrap_err(), ProviderError::Timeout);
}

#[tokio::test]
async fn test_current_weather_missing_field_is_malformed() {
    let server = MockServer::start().await;

    let mut body = current_weather(15.3);
    body.as_object_mut().unwrap().remove("main");

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = WeatherClient::new(api(&server));
    let result = client.fetch_current_weather(&LONDON).await;

    assert!(matches!(result, Err(ProviderError::Malformed(_))));
}

#[tokio::test]
async fn test_current_weather_empty_conditions_is_malformed() {
    let server = MockServer::start().await;

    let mut body = current_weather(15.3);
    body["weather"] = serde_json::json!([]);

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = WeatherClient::new(api(&server));
    let result = client.fetch_current_weather(&LONDON).await;

    assert!(matches!(result, Err(ProviderError::Malformed(_))));
}

#[tokio::test]
async fn test_forecast_success_preserves_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [
                forecast_slot(1709283600, "2024-03-01 09:00:00", 8.2),
                forecast_slot(1709294400, "2024-03-01 12:00:00", 10.4),
                forecast_slot(1709305200, "2024-03-01 15:00:00", 11.0),
            ],
            "city": {"name": "London", "timezone": 0}
        })))
        .mount(&server)
        .await;

    let client = WeatherClient::new(api(&server));
    let series = client.fetch_forecast(&LONDON).await.unwrap();

    assert_eq!(series.entries.len(), 3);
    assert_eq!(series.entries[0].temperature_c, 8.2);
    assert_eq!(series.entries[2].epoch_seconds, 1709305200);
    assert_eq!(series.hourly().len(), 3);
    let daily = series.daily();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].temperature_c, 10.4);
}

#[tokio::test]
async fn test_forecast_bad_time_label_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [forecast_slot(1709283600, "tomorrow-ish", 8.2)]
        })))
        .mount(&server)
        .await;

    let client = WeatherClient::new(api(&server));
    let result = client.fetch_forecast(&LONDON).await;

    assert!(matches!(result, Err(ProviderError::Malformed(_))));
}

#[tokio::test]
async fn test_air_quality_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .and(query_param("lat", "51.5074"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": {"lat": 51.5074, "lon": -0.1278},
            "list": [{"main": {"aqi": 2}, "components": {"pm2_5": 6.3}, "dt": 1709294400}]
        })))
        .mount(&server)
        .await;

    let client = AirQualityClient::new(api(&server));
    let sample = client.fetch_air_quality(&LONDON).await.unwrap();

    assert_eq!(sample.index, 2);
    assert_eq!(sample.pm25, 6.3);
}

#[tokio::test]
async fn test_air_quality_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = AirQualityClient::new(api(&server));
    let result = client.fetch_air_quality(&LONDON).await;

    assert!(matches!(
        result,
        Err(ProviderError::Transport { status: Some(500), .. })
    ));
}

#[tokio::test]
async fn test_news_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .and(query_param("q", "weather London"))
        .and(query_param("lang", "en"))
        .and(query_param("max", "5"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalArticles": 2,
            "articles": [
                {"title": "Storm warning", "url": "https://news.example/1", "source": {"name": "Daily"}},
                {"title": "Sunny weekend", "url": "https://news.example/2", "source": {"name": "Gazette"}}
            ]
        })))
        .mount(&server)
        .await;

    let client = NewsClient::new(api(&server));
    let articles = client.fetch_news("London").await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Storm warning");
    assert_eq!(articles[1].source_name, "Gazette");
}

#[tokio::test]
async fn test_news_empty_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalArticles": 0
        })))
        .mount(&server)
        .await;

    let client = NewsClient::new(api(&server));
    let articles = client.fetch_news("Nowhere").await.unwrap();

    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_news_forbidden_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = NewsClient::new(api(&server));
    let result = client.fetch_news("London").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_geocode_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Springfield"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Springfield", "lat": 39.78, "lon": -89.65, "state": "Illinois", "country": "US"},
            {"name": "Springfield", "lat": 37.21, "lon": -93.29, "state": "Missouri", "country": "US"},
            {"name": "Broken", "lat": 123.0, "lon": 0.0, "country": "XX"}
        ])))
        .mount(&server)
        .await;

    let client = GeocodingClient::new(api(&server));
    let locations = client.search("Springfield", 5).await.unwrap();

    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].display_name, "Springfield, Illinois, US");
    assert_eq!(locations[1].latitude, 37.21);
}
