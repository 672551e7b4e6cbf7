use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the station crawler
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub api: ApiConfig,
    pub pacing: PacingConfig,
    pub kafka: KafkaConfig,
}

/// Upstream HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Scheme and host of the platform gateway
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Route every request through `proxy_url`
    #[serde(rename = "use-proxy")]
    pub use_proxy: bool,

    /// Forward proxy address, with or without scheme
    #[serde(rename = "proxy-url")]
    pub proxy_url: String,

    /// Verify upstream TLS certificates
    #[serde(rename = "verify-tls")]
    pub verify_tls: bool,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "https://c-gw-prod.chocolateswap.com".to_string(),
            timeout_secs: 15,
            use_proxy: false,
            proxy_url: "10.121.196.239:9090".to_string(),
            verify_tls: true,
        }
    }
}

/// Fixed request parameters the platform expects
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Requester id sent with station queries
    pub uid: String,

    #[serde(rename = "channel-id")]
    pub channel_id: u32,

    #[serde(rename = "sort-type")]
    pub sort_type: u32,

    /// Stations requested per city (only the first page is fetched)
    #[serde(rename = "page-size")]
    pub page_size: u32,

    /// Business code that marks a successful response
    #[serde(rename = "success-code")]
    pub success_code: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            uid: "400183577804986524".to_string(),
            channel_id: 6,
            sort_type: 1,
            page_size: 100,
            success_code: 10000,
        }
    }
}

/// Delays applied between consecutive requests of a stage
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    #[serde(rename = "station-list-delay-ms")]
    pub station_list_delay_ms: u64,

    #[serde(rename = "station-detail-delay-ms")]
    pub station_detail_delay_ms: u64,
}

impl PacingConfig {
    pub fn station_list_delay(&self) -> Duration {
        Duration::from_millis(self.station_list_delay_ms)
    }

    pub fn station_detail_delay(&self) -> Duration {
        Duration::from_millis(self.station_detail_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            station_list_delay_ms: 500,
            station_detail_delay_ms: 300,
        }
    }
}

/// Message queue configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KafkaConfig {
    /// Bootstrap broker addresses (`host:port`)
    pub brokers: Vec<String>,

    /// Destination topic for every record
    pub topic: String,

    /// Value of the envelope's `domain_name` field
    #[serde(rename = "domain-name")]
    pub domain_name: String,

    /// Extra delivery attempts after the first one fails
    pub retries: u32,

    /// Acknowledgement timeout per delivery attempt (seconds)
    #[serde(rename = "send-timeout-secs")]
    pub send_timeout_secs: u64,

    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,
}

impl KafkaConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: vec![
                "172.21.87.116:9092".to_string(),
                "172.21.87.119:9092".to_string(),
                "172.21.84.110:9092".to_string(),
            ],
            topic: "topic_idc_raw_data_base".to_string(),
            domain_name: "www.chocolateswap.com".to_string(),
            retries: 3,
            send_timeout_secs: 10,
            retry_backoff_ms: 100,
        }
    }
}
