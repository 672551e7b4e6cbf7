//! Configuration module for the station crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a run without any file uses [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use station_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Station list delay: {}ms", config.pacing.station_list_delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, HttpConfig, KafkaConfig, PacingConfig};

// Re-export parser functions
pub use parser::{config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
