use crate::common::*;
use indexmap::IndexMap;
use serde_json::json;
use station_crawler::crawler::CrawlAbort;
use station_crawler::model::{CityInfo, CityStations};
use station_crawler::publish::Category;
use station_crawler::FailureKind;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn beijing_listing() -> IndexMap<String, CityStations> {
    let mut stations = IndexMap::new();
    stations.insert(
        "110000".to_string(),
        CityStations {
            city_info: CityInfo::from(&beijing()),
            station_data: beijing_stations(),
        },
    );
    stations
}

#[tokio::test]
async fn test_station_detail_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STATION_DETAIL_PATH))
        .and(body_json(json!({
            "uid": "400183577804986524",
            "channelId": 6,
            "lat": 39.91,
            "lng": 116.41,
            "cityCode": "110000",
            "stationId": "S1"
        })))
        .and(header(
            "referer",
            "https://static.chocolateswap.com/pages/station-details/index",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 10000, "data": {"power": 80}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&mock_server, Duration::ZERO, Duration::ZERO);
    let (mut publisher, sink) = recording_publisher().await;

    let report = crawler
        .crawl_all_stations(&beijing_listing(), Duration::from_millis(300), Some(&mut publisher))
        .await;

    assert_eq!(
        serde_json::to_value(&report.records).unwrap(),
        json!({
            "S1": {
                "station_info": {
                    "stationId": "S1",
                    "stationLat": 39.91,
                    "stationLng": 116.41,
                    "cityCode": "110000",
                    "stationName": "Station A"
                },
                "detail_data": {"code": 10000, "data": {"power": 80}}
            }
        })
    );
    assert_eq!(report.pauses, 0);

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].category(), Some(Category::StationDetail));
    assert_eq!(messages[0].data_json["detail_data"]["data"]["power"], 80);
    assert_eq!(messages[0].data_json["station_info"]["stationId"], "S1");
}

#[tokio::test]
async fn test_failed_station_is_skipped_and_still_paced() {
    let mock_server = MockServer::start().await;
    mount_station_detail(&mock_server, "S1", json!({"code": 10000, "data": {"power": 80}})).await;
    mount_station_detail(&mock_server, "S2", json!({"code": 30002, "msg": "offline"})).await;
    mount_station_detail(&mock_server, "H1", json!({"code": 10000, "data": {"power": 15}})).await;

    let mut stations = beijing_listing();
    stations.get_mut("110000").unwrap().station_data = json!({
        "code": 10000,
        "data": {"pageObject": [{"stationId": "S1"}, {"stationId": "S2"}]}
    });
    stations.insert(
        "330100".to_string(),
        CityStations {
            city_info: CityInfo::from(&city("Hangzhou", "330100")),
            station_data: json!({"code": 10000, "data": {"total": 1, "rows": [{"stationId": "H1"}]}}),
        },
    );

    let crawler = test_crawler(&mock_server, Duration::ZERO, Duration::ZERO);
    let (mut publisher, sink) = recording_publisher().await;

    let report = crawler
        .crawl_all_stations(&stations, Duration::from_millis(5), Some(&mut publisher))
        .await;

    let ids: Vec<_> = report.records.keys().cloned().collect();
    assert_eq!(ids, vec!["S1", "H1"]);
    assert_eq!(report.records["H1"].station_info.city_code, "330100");
    assert_eq!(report.attempted, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].key, "S2");
    assert_eq!(report.failures_of(FailureKind::Business), 1);
    assert_eq!(report.pauses, 2);
    assert_eq!(sink.count(Category::StationDetail), 2);
}

#[tokio::test]
async fn test_cities_without_station_array_contribute_nothing() {
    let mock_server = MockServer::start().await;

    let mut stations = beijing_listing();
    stations.get_mut("110000").unwrap().station_data = json!({"code": 10000, "data": {"total": 0}});

    let crawler = test_crawler(&mock_server, Duration::ZERO, Duration::ZERO);
    let report = crawler
        .crawl_all_stations(&stations, Duration::from_millis(300), None)
        .await;

    assert!(report.is_empty());
    assert_eq!(report.attempted, 0);
    assert_eq!(report.pauses, 0);
    assert_eq!(requests_to(&mock_server, STATION_DETAIL_PATH).await, 0);
}

#[tokio::test]
async fn test_transport_failure_per_station() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STATION_DETAIL_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&mock_server, Duration::ZERO, Duration::ZERO);
    let report = crawler
        .crawl_all_stations(&beijing_listing(), Duration::ZERO, None)
        .await;

    assert!(report.is_empty());
    assert_eq!(report.failures_of(FailureKind::Transport), 1);
    assert_eq!(report.failures[0].error.status(), Some(500));
}

#[tokio::test]
async fn test_full_detail_run() {
    let mock_server = MockServer::start().await;
    mount_cities(
        &mock_server,
        json!({"code": 10000, "data": [{"areaInfoDtoList": [beijing_record()]}]}),
    )
    .await;
    mount_station_list(&mock_server, "110000", beijing_stations()).await;
    mount_station_detail(&mock_server, "S1", json!({"code": 10000, "data": {"power": 80}})).await;

    let crawler = test_crawler(&mock_server, Duration::ZERO, Duration::ZERO);
    let (mut publisher, sink) = recording_publisher().await;

    let report = crawler
        .get_all_station_details(Some(&mut publisher))
        .await
        .expect("Detail crawl aborted");

    assert_eq!(report.len(), 1);
    assert_eq!(report.records["S1"].detail_data["data"]["power"], 80);
    assert_eq!(sink.count(Category::StationList), 1);
    assert_eq!(sink.count(Category::StationDetail), 1);

    let batch_times: Vec<_> = sink
        .messages()
        .into_iter()
        .map(|message| message.dc_batch_time)
        .collect();
    assert_eq!(batch_times[0], batch_times[1]);
}

#[tokio::test]
async fn test_detail_run_aborts_without_station_lists() {
    let mock_server = MockServer::start().await;
    mount_cities(
        &mock_server,
        json!({"code": 10000, "data": [{"areaInfoDtoList": [beijing_record()]}]}),
    )
    .await;
    mount_station_list(&mock_server, "110000", json!({"code": 20001, "msg": "busy"})).await;

    let crawler = test_crawler(&mock_server, Duration::ZERO, Duration::ZERO);
    let result = crawler.get_all_station_details(None).await;

    assert!(matches!(
        result,
        Err(CrawlAbort::NoStations {
            attempted: 1,
            failed: 1
        })
    ));
    assert_eq!(requests_to(&mock_server, STATION_DETAIL_PATH).await, 0);
}

#[tokio::test]
async fn test_upstream_field_types_reach_requests_and_records_unchanged() {
    let mock_server = MockServer::start().await;
    let city_record = json!({
        "cityName": "Hangzhou",
        "cityCode": 330100,
        "cityLat": "30.2741",
        "cityLng": "120.1551",
        "provinceName": "Zhejiang"
    });
    let station_list = json!({
        "code": 10000,
        "data": {"list": [{"stationId": 9001, "stationLat": "30.28", "stationLng": 120.16, "stationName": null}]}
    });

    Mock::given(method("POST"))
        .and(path(STATION_LIST_PATH))
        .and(body_json(json!({
            "sortType": 1,
            "uid": "400183577804986524",
            "channelId": 6,
            "pageIndex": 1,
            "pageSize": 100,
            "lat": "30.2741",
            "lng": "120.1551",
            "cityCode": 330100
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(station_list.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(STATION_DETAIL_PATH))
        .and(body_json(json!({
            "uid": "400183577804986524",
            "channelId": 6,
            "lat": "30.28",
            "lng": 120.16,
            "cityCode": 330100,
            "stationId": 9001
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 10000, "data": {"power": 60}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&mock_server, Duration::ZERO, Duration::ZERO);
    let (mut publisher, sink) = recording_publisher().await;
    let city = serde_json::from_value(city_record).unwrap();

    let listing = crawler
        .crawl_all_cities(&[city], Duration::ZERO, Some(&mut publisher))
        .await;
    assert_eq!(
        serde_json::to_value(&listing.records["330100"].city_info).unwrap(),
        json!({"cityName": "Hangzhou", "cityCode": 330100, "provinceName": "Zhejiang"})
    );

    let details = crawler
        .crawl_all_stations(&listing.records, Duration::ZERO, Some(&mut publisher))
        .await;
    let expected_info = json!({
        "stationId": 9001,
        "stationLat": "30.28",
        "stationLng": 120.16,
        "cityCode": 330100,
        "stationName": null
    });
    assert_eq!(
        serde_json::to_value(&details.records["9001"].station_info).unwrap(),
        expected_info
    );

    let messages = sink.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].data_json["city_info"]["cityCode"], 330100);
    assert_eq!(messages[1].data_json["station_info"], expected_info);
}
