use crate::model::key;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An operationally active city, as returned by the city endpoint
///
/// Only these five fields are kept from each upstream city record, each
/// copied as-is; a missing field is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(default)]
    pub city_name: Value,

    #[serde(default)]
    pub city_code: Value,

    #[serde(default)]
    pub city_lat: Value,

    #[serde(default)]
    pub city_lng: Value,

    #[serde(default)]
    pub province_name: Value,
}

impl City {
    /// Join key into station records; empty when upstream omitted it
    pub fn code(&self) -> String {
        key::join_key(&self.city_code)
    }

    /// Name for progress output, falling back to the code
    pub fn display_name(&self) -> String {
        display_name(&self.city_name, &self.city_code)
    }
}

fn display_name(name: &Value, code: &Value) -> String {
    if name.is_null() {
        key::join_key(code)
    } else {
        key::label(name)
    }
}

/// The part of a [`City`] carried along with its station list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInfo {
    #[serde(default)]
    pub city_name: Value,
    #[serde(default)]
    pub city_code: Value,
    #[serde(default)]
    pub province_name: Value,
}

impl From<&City> for CityInfo {
    fn from(city: &City) -> Self {
        Self {
            city_name: city.city_name.clone(),
            city_code: city.city_code.clone(),
            province_name: city.province_name.clone(),
        }
    }
}

/// One city's station-list result: the city plus the raw upstream response
///
/// This is also the `data_json` payload of a station-list message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStations {
    pub city_info: CityInfo,
    pub station_data: Value,
}

impl CityStations {
    pub fn city_name(&self) -> String {
        display_name(&self.city_info.city_name, &self.city_info.city_code)
    }
}
