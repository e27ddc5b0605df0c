#![allow(dead_code)]

use qweather_core::{ClientSettings, HttpTransport, LogLevel, QWeather};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

pub const API_KEY: &str = "test-secret-key";

pub fn transport(server: &MockServer) -> HttpTransport {
    HttpTransport::new(
        ClientSettings::new(server.uri(), API_KEY).with_log_level(LogLevel::Debug),
    )
    .expect("transport must build")
}

pub fn qweather(server: &MockServer) -> QWeather {
    QWeather::new(Arc::new(transport(server)))
}

pub fn city(name: &str, id: &str, lat: &str, lon: &str) -> Value {
    json!({
        "name": name,
        "id": id,
        "lat": lat,
        "lon": lon,
        "adm2": name,
        "adm1": name,
        "country": "China",
        "tz": "Asia/Shanghai",
        "type": "city",
        "rank": "10",
        "fxLink": "https://www.qweather.com/en/weather7d/example.html"
    })
}

/// Mount a lookup that answers `name` with `candidates`.
pub async fn mount_lookup(server: &MockServer, name: &str, candidates: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/geo/v2/city/lookup"))
        .and(query_param("location", name))
        .and(header("X-QW-Api-Key", API_KEY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "code": "200",
                "location": candidates,
            })),
        )
        .mount(server)
        .await;
}

pub async fn mount_beijing(server: &MockServer) {
    mount_lookup(
        server,
        "Beijing",
        vec![city("Beijing", "101010100", "39.90499", "116.40529")],
    )
    .await;
}

pub async fn data_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() != "/geo/v2/city/lookup")
        .count()
}
