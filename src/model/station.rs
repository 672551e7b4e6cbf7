use crate::model::key;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name used when a station entry has no `stationName` key
pub const UNKNOWN_STATION_NAME: &str = "未知站点";

/// A station queued for a detail fetch, tied to its owning city
///
/// This is the `station_info` carried into detail records. Every field is
/// copied from the station-list entry unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRef {
    #[serde(default)]
    pub station_id: Value,
    #[serde(default)]
    pub station_lat: Value,
    #[serde(default)]
    pub station_lng: Value,
    #[serde(default)]
    pub city_code: Value,
    #[serde(default)]
    pub station_name: Value,
}

impl StationRef {
    /// Reads one entry of a station-list array; non-objects yield `None`
    ///
    /// Only an absent `stationName` falls back to [`UNKNOWN_STATION_NAME`];
    /// an explicit `null` is kept.
    pub fn from_entry(entry: &Value, city_code: &Value) -> Option<Self> {
        let entry = entry.as_object()?;
        Some(Self {
            station_id: field(entry, "stationId"),
            station_lat: field(entry, "stationLat"),
            station_lng: field(entry, "stationLng"),
            city_code: city_code.clone(),
            station_name: entry
                .get("stationName")
                .cloned()
                .unwrap_or_else(|| Value::from(UNKNOWN_STATION_NAME)),
        })
    }

    /// Key of the station in detail results; empty when upstream omitted it
    pub fn id(&self) -> String {
        key::join_key(&self.station_id)
    }

    pub fn name(&self) -> String {
        key::label(&self.station_name)
    }
}

fn field(entry: &Map<String, Value>, name: &str) -> Value {
    entry.get(name).cloned().unwrap_or(Value::Null)
}

/// One station's detail result: the station plus the raw upstream response
///
/// This is also the `data_json` payload of a station-detail message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDetails {
    pub station_info: StationRef,
    pub detail_data: Value,
}
