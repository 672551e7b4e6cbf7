use crate::api::{CityQuery, Endpoint, FetchError};
use crate::crawler::Crawler;
use crate::model::City;
use serde::Deserialize;
use serde_json::Value;

impl Crawler {
    /// Fetches every operationally active city
    ///
    /// The endpoint returns all cities in one response, grouped; the groups
    /// are flattened in order. Any failure is terminal for this stage.
    pub async fn fetch_cities(&self) -> Result<Vec<City>, FetchError> {
        tracing::info!("Fetching city list...");

        let body = match self.api.post(Endpoint::CityInfo, &CityQuery::active()).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to fetch city list: {}", e);
                return Err(e);
            }
        };

        let cities = extract_cities(&body);
        tracing::info!("Fetched {} cities", cities.len());
        Ok(cities)
    }
}

/// Flattens `data[*].areaInfoDtoList[*]` into cities
///
/// Entries that are not JSON objects are skipped.
pub fn extract_cities(body: &Value) -> Vec<City> {
    let Some(groups) = body.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };

    groups
        .iter()
        .filter_map(|group| group.get("areaInfoDtoList").and_then(Value::as_array))
        .flatten()
        .filter(|city| city.is_object())
        .filter_map(|city| City::deserialize(city).ok())
        .collect()
}
