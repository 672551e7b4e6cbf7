//! Request bodies for the three endpoints

use serde::Serialize;
use serde_json::Value;

/// Body of the city query; `operate_status = 1` selects active cities only
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityQuery {
    pub operate_status: u8,
}

impl CityQuery {
    pub fn active() -> Self {
        Self { operate_status: 1 }
    }
}

/// Body of the per-city station list query (first page only)
///
/// Coordinates and code are forwarded exactly as the city list gave them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationListQuery<'a> {
    pub sort_type: u32,
    pub uid: &'a str,
    pub channel_id: u32,
    pub page_index: u32,
    pub page_size: u32,
    pub lat: &'a Value,
    pub lng: &'a Value,
    pub city_code: &'a Value,
}

/// Body of the per-station detail query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDetailQuery<'a> {
    pub uid: &'a str,
    pub channel_id: u32,
    pub lat: &'a Value,
    pub lng: &'a Value,
    pub city_code: &'a Value,
    pub station_id: &'a Value,
}
