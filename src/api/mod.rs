//! Upstream API plumbing
//!
//! This module handles all HTTP requests to the platform gateway, including:
//! - Building the HTTP client (headers, timeout, proxy, TLS verification)
//! - JSON request bodies for the three endpoints
//! - Checking the business status code embedded in every response
//! - Classifying failures into transport, malformed and business errors

mod client;
mod error;
mod payload;

pub use client::{build_http_client, check_business_code, ApiClient, Endpoint};
pub use error::{FailureKind, FetchError};
pub use payload::{CityQuery, StationDetailQuery, StationListQuery};
