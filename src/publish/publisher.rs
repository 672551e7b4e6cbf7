use crate::config::KafkaConfig;
use crate::publish::kafka::KafkaSink;
use crate::publish::message::{now_timestamp, Category, OutboundMessage};
use crate::publish::sink::{DeliveryReceipt, MessageSink, SinkError};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by [`Publisher`]
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Publisher is not connected; call connect() first")]
    NotConnected,

    #[error("Failed to connect to {target}: {source}")]
    Connect { target: String, source: SinkError },

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Delivery failed: {0}")]
    Delivery(#[source] SinkError),
}

/// Handle that forwards crawl records to the message queue
///
/// One publisher is built per run and passed to each stage. Its lifecycle
/// is `new` -> `connect` -> any number of `send`s -> `close`; every message
/// it builds shares the batch time fixed at construction.
pub struct Publisher {
    sink: Box<dyn MessageSink>,
    domain_name: String,
    batch_time: String,
    connected: bool,
}

impl Publisher {
    pub fn new(sink: Box<dyn MessageSink>, domain_name: impl Into<String>) -> Self {
        Self {
            sink,
            domain_name: domain_name.into(),
            batch_time: now_timestamp(),
            connected: false,
        }
    }

    /// Publisher backed by the configured Kafka cluster (not yet connected)
    pub fn kafka(config: &KafkaConfig) -> Self {
        Self::new(Box::new(KafkaSink::new(config)), config.domain_name.clone())
    }

    pub fn batch_time(&self) -> &str {
        &self.batch_time
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Connects the underlying sink
    pub async fn connect(&mut self) -> Result<(), PublishError> {
        let target = self.sink.describe();
        match self.sink.connect().await {
            Ok(()) => {
                tracing::info!("Connected to message queue: {}", target);
                self.connected = true;
                Ok(())
            }
            Err(source) => {
                tracing::error!("Failed to connect to message queue {}: {}", target, source);
                self.connected = false;
                Err(PublishError::Connect { target, source })
            }
        }
    }

    /// Wraps a payload in an envelope stamped with the current record time
    pub fn message<T>(
        &self,
        category: Category,
        payload: &T,
    ) -> Result<OutboundMessage, PublishError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(payload)?;
        Ok(OutboundMessage::new(
            &self.domain_name,
            category,
            data,
            &self.batch_time,
        ))
    }

    /// Sends one message and waits for the broker's acknowledgement
    ///
    /// Fails without touching the sink when `connect` has not succeeded.
    pub async fn send(
        &mut self,
        message: &OutboundMessage,
    ) -> Result<DeliveryReceipt, PublishError> {
        if !self.connected {
            tracing::error!("Publisher is not connected; call connect() first");
            return Err(PublishError::NotConnected);
        }

        let bytes = message.to_bytes()?;
        match self.sink.deliver(&bytes).await {
            Ok(receipt) => {
                tracing::debug!(
                    "Message delivered: topic={}, partition={}, offset={}",
                    receipt.topic,
                    receipt.partition,
                    receipt.offset
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!("Message delivery failed: {}", e);
                Err(PublishError::Delivery(e))
            }
        }
    }

    /// Builds and sends a message in one step
    pub async fn publish<T>(
        &mut self,
        category: Category,
        payload: &T,
    ) -> Result<DeliveryReceipt, PublishError>
    where
        T: Serialize + ?Sized,
    {
        if !self.connected {
            tracing::error!("Publisher is not connected; call connect() first");
            return Err(PublishError::NotConnected);
        }

        let message = self.message(category, payload)?;
        self.send(&message).await
    }

    /// Sends messages one by one, returning how many were acknowledged
    pub async fn send_batch(&mut self, messages: &[OutboundMessage]) -> usize {
        if !self.connected {
            tracing::error!("Publisher is not connected; call connect() first");
            return 0;
        }

        let mut delivered = 0;
        for message in messages {
            if self.send(message).await.is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Closes the sink; later sends fail until `connect` is called again
    pub async fn close(&mut self) {
        if self.connected {
            self.sink.close().await;
            self.connected = false;
            tracing::info!("Message queue connection closed");
        }
    }
}
