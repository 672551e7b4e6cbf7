//! Records collected by the crawl
//!
//! City and station fields are carried as raw JSON values so they reach the
//! request bodies and published envelopes unchanged; [`key`] derives the
//! string keys the result maps are indexed by.

mod city;
pub mod key;
mod station;

pub use city::{City, CityInfo, CityStations};
pub use station::{StationDetails, StationRef, UNKNOWN_STATION_NAME};
