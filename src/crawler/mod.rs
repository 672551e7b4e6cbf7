//! Crawl stages
//!
//! This module contains the three sequential fetch stages:
//! - City listing (one request for every active city)
//! - Station listing (one request per city, paced)
//! - Station details (one request per station, paced)
//!
//! Each stage publishes its records as they arrive and reports per-item
//! failures in a [`StageReport`] instead of aborting.

mod cities;
mod details;
mod pacing;
mod report;
pub mod resolve;
mod stations;

pub use cities::extract_cities;
pub use details::{station_worklist, CityBatch};
pub use pacing::Pacer;
pub use report::{ItemFailure, StageReport};
pub use resolve::{
    resolve_station_array, resolve_station_response, StationArray, STATION_ARRAY_KEYS,
};

use crate::api::{ApiClient, FetchError};
use crate::config::{Config, PacingConfig};
use crate::CrawlerError;
use thiserror::Error;

/// Why an orchestrated run stopped before its own stage started
#[derive(Debug, Error)]
pub enum CrawlAbort {
    #[error("Failed to fetch city list: {0}")]
    Cities(#[source] FetchError),

    #[error("City list is empty")]
    NoCities,

    #[error("No station lists collected ({failed} of {attempted} cities failed)")]
    NoStations { attempted: usize, failed: usize },
}

/// Runs the crawl stages against one upstream API
pub struct Crawler {
    api: ApiClient,
    pacing: PacingConfig,
}

impl Crawler {
    pub fn new(api: ApiClient, pacing: PacingConfig) -> Self {
        Self { api, pacing }
    }

    /// Builds the API client and pacing from the run configuration
    pub fn from_config(config: &Config) -> Result<Self, CrawlerError> {
        Ok(Self::new(ApiClient::new(config)?, config.pacing.clone()))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn pacing(&self) -> &PacingConfig {
        &self.pacing
    }
}
