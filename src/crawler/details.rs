use crate::api::{Endpoint, FetchError, StationDetailQuery};
use crate::crawler::resolve::{resolve_station_response, StationArray};
use crate::crawler::{CrawlAbort, Crawler, Pacer, StageReport};
use crate::model::{CityStations, StationDetails, StationRef};
use crate::publish::{Category, Publisher};
use indexmap::IndexMap;
use serde_json::Value;
use std::time::Duration;

/// Stations of one city, queued for detail fetches
#[derive(Debug, Clone)]
pub struct CityBatch {
    pub city_code: String,
    pub city_name: String,
    pub stations: Vec<StationRef>,
}

/// Flattens station-list results into the detail worklist
///
/// Cities keep their insertion order and stations the order of their
/// resolved array. The result depends only on `stations`, so building it
/// twice from the same input yields the same worklist.
pub fn station_worklist(stations: &IndexMap<String, CityStations>) -> Vec<CityBatch> {
    stations
        .iter()
        .map(|(city_code, city)| {
            let city_name = city.city_name();
            let resolved = resolve_station_response(&city.station_data);
            match resolved {
                StationArray::NotAnArray { key } => {
                    tracing::warn!("{}: '{}' is not an array, no stations", city_name, key);
                }
                StationArray::Unresolved => {
                    tracing::warn!("{}: no station array in response", city_name);
                }
                _ => {}
            }

            let refs = resolved
                .items()
                .iter()
                .filter_map(|value| {
                    let station = StationRef::from_entry(value, &city.city_info.city_code);
                    if station.is_none() {
                        tracing::warn!("{}: skipping non-object station entry", city_name);
                    }
                    station
                })
                .collect();

            CityBatch {
                city_code: city_code.clone(),
                city_name,
                stations: refs,
            }
        })
        .collect()
}

impl Crawler {
    /// Fetches the detail record of one station
    pub async fn fetch_detail(&self, station: &StationRef) -> Result<Value, FetchError> {
        let api = self.api.api();
        let query = StationDetailQuery {
            uid: &api.uid,
            channel_id: api.channel_id,
            lat: &station.station_lat,
            lng: &station.station_lng,
            city_code: &station.city_code,
            station_id: &station.station_id,
        };

        self.api.post(Endpoint::StationDetail, &query).await
    }

    /// Fetches details for every station of every city, one at a time
    ///
    /// `delay` is slept after each station except the last one of the whole
    /// worklist. Successes are published as station-detail messages when a
    /// publisher is given; failed stations are listed in the report.
    pub async fn crawl_all_stations(
        &self,
        stations: &IndexMap<String, CityStations>,
        delay: Duration,
        mut publisher: Option<&mut Publisher>,
    ) -> StageReport<StationDetails> {
        let mut report = StageReport::new();
        let mut pacer = Pacer::new(delay);

        let batches = station_worklist(stations);
        let total: usize = batches.iter().map(|batch| batch.stations.len()).sum();
        tracing::info!("Crawling details for {} stations...", total);

        let mut current = 0;
        for batch in batches {
            tracing::info!(
                "Processing city: {} ({} stations)",
                batch.city_name,
                batch.stations.len()
            );

            for station in batch.stations {
                current += 1;
                let id = station.id();
                let name = station.name();
                tracing::info!(
                    "[{}/{}] Fetching details for {} ({})",
                    current,
                    total,
                    name,
                    id
                );
                report.attempted += 1;

                match self.fetch_detail(&station).await {
                    Ok(detail) => {
                        let record = StationDetails {
                            station_info: station,
                            detail_data: detail,
                        };
                        tracing::info!("  ✓ Fetched details for {}", name);

                        if let Some(publisher) = publisher.as_deref_mut() {
                            match publisher.publish(Category::StationDetail, &record).await {
                                Ok(_) => report.published += 1,
                                Err(e) => {
                                    tracing::warn!(
                                        "  × Failed to publish details for {}: {}",
                                        name,
                                        e
                                    );
                                    report.publish_failures += 1;
                                }
                            }
                        }

                        report.records.insert(id, record);
                    }
                    Err(e) => {
                        tracing::warn!("  × Failed to fetch details for {}: {}", name, e);
                        report.record_failure(&id, &name, e);
                    }
                }

                if current < total {
                    pacer.pause().await;
                }
            }
        }

        report.pauses = pacer.pauses();
        report
    }

    /// Runs the city and station stages, then fetches every station's details
    ///
    /// Station-list messages are published on the way, like a standalone
    /// station run. Stops early when the earlier stages collected nothing.
    pub async fn get_all_station_details(
        &self,
        mut publisher: Option<&mut Publisher>,
    ) -> Result<StageReport<StationDetails>, CrawlAbort> {
        let listing = self.get_all_stations(publisher.as_deref_mut()).await?;
        if listing.is_empty() {
            tracing::error!("No station lists collected, nothing to crawl");
            return Err(CrawlAbort::NoStations {
                attempted: listing.attempted,
                failed: listing.failures.len(),
            });
        }

        tracing::info!("Collected station lists for {} cities", listing.len());

        Ok(self
            .crawl_all_stations(
                &listing.records,
                self.pacing.station_detail_delay(),
                publisher,
            )
            .await)
    }
}
