//! Station crawler: collects cities, stations and station details from a
//! scooter-sharing platform's public API and forwards every record to Kafka.
//!
//! The crawl is a strictly sequential three-stage pipeline:
//! cities -> stations per city -> details per station. Each stage paces its
//! requests and publishes each successful record as soon as it is fetched.

pub mod api;
pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod publish;

use thiserror::Error;

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid proxy '{url}': {source}")]
    Proxy { url: String, source: reqwest::Error },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::{ApiClient, FailureKind, FetchError};
pub use config::Config;
pub use crawler::{resolve_station_array, Pacer, StageReport, StationArray};
pub use model::{City, CityInfo, CityStations, StationDetails, StationRef};
pub use publish::{Category, KafkaSink, MessageSink, OutboundMessage, Publisher};
