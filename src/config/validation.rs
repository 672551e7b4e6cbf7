use crate::config::types::{ApiConfig, Config, HttpConfig, KafkaConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_api_config(&config.api)?;
    validate_kafka_config(&config.kafka)?;
    Ok(())
}

/// Validates upstream HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.use_proxy && config.proxy_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "proxy_url cannot be empty when use_proxy is set".to_string(),
        ));
    }

    Ok(())
}

fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    if config.page_size == 0 {
        return Err(ConfigError::Validation(
            "page_size must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates message queue configuration
fn validate_kafka_config(config: &KafkaConfig) -> Result<(), ConfigError> {
    if config.brokers.is_empty() {
        return Err(ConfigError::Validation(
            "kafka brokers cannot be empty".to_string(),
        ));
    }

    for broker in &config.brokers {
        validate_broker_address(broker)?;
    }

    if config.topic.is_empty() {
        return Err(ConfigError::Validation(
            "kafka topic cannot be empty".to_string(),
        ));
    }

    if config.send_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "send_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates a `host:port` broker address
fn validate_broker_address(broker: &str) -> Result<(), ConfigError> {
    let (host, port) = broker.rsplit_once(':').ok_or_else(|| {
        ConfigError::Validation(format!("Broker '{}' must be in host:port form", broker))
    })?;

    if host.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Broker '{}' is missing a host",
            broker
        )));
    }

    port.parse::<u16>().map_err(|_| {
        ConfigError::Validation(format!("Broker '{}' has an invalid port", broker))
    })?;

    Ok(())
}
