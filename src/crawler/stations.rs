use crate::api::{Endpoint, FetchError, StationListQuery};
use crate::crawler::resolve::resolve_station_response;
use crate::crawler::{CrawlAbort, Crawler, Pacer, StageReport};
use crate::model::{City, CityInfo, CityStations};
use crate::publish::{Category, Publisher};
use serde_json::Value;
use std::time::Duration;

impl Crawler {
    /// Fetches the first page of stations around a city's centre
    pub async fn fetch_stations_for_city(&self, city: &City) -> Result<Value, FetchError> {
        let api = self.api.api();
        let query = StationListQuery {
            sort_type: api.sort_type,
            uid: &api.uid,
            channel_id: api.channel_id,
            page_index: 1,
            page_size: api.page_size,
            lat: &city.city_lat,
            lng: &city.city_lng,
            city_code: &city.city_code,
        };

        self.api.post(Endpoint::StationList, &query).await
    }

    /// Fetches station lists for every city, in order
    ///
    /// `delay` is slept after each city except the last, whether or not
    /// its fetch succeeded. Each success is published immediately as a
    /// station-list message when a publisher is given; failed cities are
    /// left out of the records and listed in the report's failures.
    pub async fn crawl_all_cities(
        &self,
        cities: &[City],
        delay: Duration,
        mut publisher: Option<&mut Publisher>,
    ) -> StageReport<CityStations> {
        let mut report = StageReport::new();
        let mut pacer = Pacer::new(delay);
        let total = cities.len();

        tracing::info!("Crawling station lists for {} cities...", total);

        for (index, city) in cities.iter().enumerate() {
            let code = city.code();
            let name = city.display_name();
            tracing::info!("[{}/{}] Fetching stations for {}", index + 1, total, name);
            report.attempted += 1;

            match self.fetch_stations_for_city(city).await {
                Ok(response) => {
                    let entry = CityStations {
                        city_info: CityInfo::from(city),
                        station_data: response,
                    };
                    tracing::info!(
                        "  ✓ {}: {} stations",
                        name,
                        resolve_station_response(&entry.station_data).len()
                    );

                    if let Some(publisher) = publisher.as_deref_mut() {
                        match publisher.publish(Category::StationList, &entry).await {
                            Ok(_) => report.published += 1,
                            Err(e) => {
                                tracing::warn!(
                                    "  × Failed to publish station list for {}: {}",
                                    name,
                                    e
                                );
                                report.publish_failures += 1;
                            }
                        }
                    }

                    report.records.insert(code, entry);
                }
                Err(e) => {
                    tracing::warn!("  × Failed to fetch stations for {}: {}", name, e);
                    report.record_failure(&code, &name, e);
                }
            }

            if index + 1 < total {
                pacer.pause().await;
            }
        }

        report.pauses = pacer.pauses();
        report
    }

    /// Fetches the city list, then every city's stations
    ///
    /// Stops before the station stage when no city could be listed.
    pub async fn get_all_stations(
        &self,
        publisher: Option<&mut Publisher>,
    ) -> Result<StageReport<CityStations>, CrawlAbort> {
        let cities = self.fetch_cities().await.map_err(CrawlAbort::Cities)?;
        if cities.is_empty() {
            tracing::error!("City list is empty, nothing to crawl");
            return Err(CrawlAbort::NoCities);
        }

        Ok(self
            .crawl_all_cities(&cities, self.pacing.station_list_delay(), publisher)
            .await)
    }
}
