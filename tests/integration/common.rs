#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use station_crawler::config::{Config, PacingConfig};
use station_crawler::crawler::Crawler;
use station_crawler::publish::{
    Category, DeliveryReceipt, MessageSink, OutboundMessage, Publisher, SinkError,
};
use station_crawler::{ApiClient, City};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CITY_PATH: &str = "/ps-base-api/area/manage/queryCityInfo";
pub const STATION_LIST_PATH: &str = "/station/search/queryStationList";
pub const STATION_DETAIL_PATH: &str = "/station/search/queryStationDetail";

/// Sink that keeps every delivered message in memory
#[derive(Clone, Default)]
pub struct RecordingSink {
    delivered: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn count(&self, category: Category) -> usize {
        self.messages()
            .iter()
            .filter(|message| message.category() == Some(category))
            .count()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn connect(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    async fn deliver(&mut self, payload: &[u8]) -> Result<DeliveryReceipt, SinkError> {
        let message: OutboundMessage = serde_json::from_slice(payload)
            .map_err(|e| SinkError::Rejected(e.to_string()))?;
        let mut delivered = self.delivered.lock().unwrap();
        delivered.push(message);
        Ok(DeliveryReceipt {
            topic: "test-topic".to_string(),
            partition: 0,
            offset: delivered.len() as i64 - 1,
        })
    }

    async fn close(&mut self) {}

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Builds a crawler pointed at the mock server, with the given delays
pub fn test_crawler(server: &MockServer, list_delay: Duration, detail_delay: Duration) -> Crawler {
    let mut config = Config::default();
    config.http.base_url = server.uri();
    config.http.timeout_secs = 5;

    let api = ApiClient::new(&config).expect("Failed to build API client");
    Crawler::new(
        api,
        PacingConfig {
            station_list_delay_ms: list_delay.as_millis() as u64,
            station_detail_delay_ms: detail_delay.as_millis() as u64,
        },
    )
}

/// A connected publisher backed by a recording sink
pub async fn recording_publisher() -> (Publisher, RecordingSink) {
    let sink = RecordingSink::default();
    let mut publisher = Publisher::new(Box::new(sink.clone()), "www.chocolateswap.com");
    publisher.connect().await.expect("Recording sink always connects");
    (publisher, sink)
}

pub fn beijing_record() -> Value {
    json!({
        "cityName": "Beijing",
        "cityCode": "110000",
        "cityLat": 39.9,
        "cityLng": 116.4,
        "provinceName": "Beijing"
    })
}

pub fn beijing() -> City {
    serde_json::from_value(beijing_record()).unwrap()
}

pub fn city(name: &str, code: &str) -> City {
    serde_json::from_value(json!({
        "cityName": name,
        "cityCode": code,
        "cityLat": 30.0,
        "cityLng": 120.0,
        "provinceName": name
    }))
    .unwrap()
}

pub fn beijing_stations() -> Value {
    json!({
        "code": 10000,
        "data": {
            "stationList": [
                {"stationId": "S1", "stationLat": 39.91, "stationLng": 116.41, "stationName": "Station A"}
            ]
        }
    })
}

pub async fn mount_cities(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path(CITY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_station_list(server: &MockServer, city_code: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path(STATION_LIST_PATH))
        .and(body_partial_json(json!({"cityCode": city_code})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_station_detail(server: &MockServer, station_id: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path(STATION_DETAIL_PATH))
        .and(body_partial_json(json!({"stationId": station_id})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Number of requests the mock server received on `endpoint`
pub async fn requests_to(server: &MockServer, endpoint: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == endpoint)
        .count()
}
