use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a message sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rskafka::client::error::Error),

    #[error("Topic '{0}' not found on the cluster")]
    UnknownTopic(String),

    #[error("No acknowledgement within {0:?}")]
    Timeout(Duration),

    #[error("Sink is not connected")]
    NotConnected,

    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// Where the broker stored a delivered record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
}

/// Transport behind a [`Publisher`](crate::publish::Publisher)
///
/// `deliver` only returns once the destination has acknowledged the record;
/// any retrying happens inside the sink.
#[async_trait]
pub trait MessageSink: Send {
    /// Opens the connection; called once before any delivery
    async fn connect(&mut self) -> Result<(), SinkError>;

    /// Delivers one encoded record
    async fn deliver(&mut self, payload: &[u8]) -> Result<DeliveryReceipt, SinkError>;

    /// Releases the connection
    async fn close(&mut self);

    /// Human-readable destination for logs
    fn describe(&self) -> String;
}
