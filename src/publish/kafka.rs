use crate::config::KafkaConfig;
use crate::publish::sink::{DeliveryReceipt, MessageSink, SinkError};
use async_trait::async_trait;
use chrono::Utc;
use rskafka::client::partition::{Compression, PartitionClient, UnknownTopicHandling};
use rskafka::client::{Client, ClientBuilder};
use rskafka::record::Record;
use std::collections::BTreeMap;
use std::time::Duration;

/// Kafka-backed [`MessageSink`]
///
/// Produce requests are acknowledged by all in-sync replicas before they
/// complete. Records carry no key and are spread round-robin over the
/// topic's partitions.
pub struct KafkaSink {
    brokers: Vec<String>,
    topic: String,
    retries: u32,
    send_timeout: Duration,
    retry_backoff: Duration,
    client: Option<Client>,
    partitions: Vec<(i32, PartitionClient)>,
    next_partition: usize,
}

impl KafkaSink {
    pub fn new(config: &KafkaConfig) -> Self {
        Self {
            brokers: config.brokers.clone(),
            topic: config.topic.clone(),
            retries: config.retries,
            send_timeout: config.send_timeout(),
            retry_backoff: config.retry_backoff(),
            client: None,
            partitions: Vec::new(),
            next_partition: 0,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Attempts allowed for one delivery
    fn max_attempts(&self) -> u32 {
        self.retries + 1
    }
}

#[async_trait]
impl MessageSink for KafkaSink {
    async fn connect(&mut self) -> Result<(), SinkError> {
        let client = ClientBuilder::new(self.brokers.clone()).build().await?;

        let partition_ids: Vec<i32> = client
            .list_topics()
            .await?
            .into_iter()
            .find(|topic| topic.name == self.topic)
            .map(|topic| topic.partitions.into_iter().collect())
            .ok_or_else(|| SinkError::UnknownTopic(self.topic.clone()))?;

        if partition_ids.is_empty() {
            return Err(SinkError::UnknownTopic(self.topic.clone()));
        }

        let mut partitions = Vec::with_capacity(partition_ids.len());
        for id in partition_ids {
            let partition = client
                .partition_client(self.topic.clone(), id, UnknownTopicHandling::Error)
                .await?;
            partitions.push((id, partition));
        }

        tracing::debug!(
            "Topic {} has {} partition(s)",
            self.topic,
            partitions.len()
        );

        self.partitions = partitions;
        self.client = Some(client);
        self.next_partition = 0;
        Ok(())
    }

    async fn deliver(&mut self, payload: &[u8]) -> Result<DeliveryReceipt, SinkError> {
        if self.partitions.is_empty() {
            return Err(SinkError::NotConnected);
        }

        let index = self.next_partition % self.partitions.len();
        self.next_partition = self.next_partition.wrapping_add(1);

        let max_attempts = self.max_attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;

            let record = Record {
                key: None,
                value: Some(payload.to_vec()),
                headers: BTreeMap::new(),
                timestamp: Utc::now(),
            };

            let (partition_id, partition) = &self.partitions[index];
            let outcome = tokio::time::timeout(
                self.send_timeout,
                partition.produce(vec![record], Compression::NoCompression),
            )
            .await;

            let error = match outcome {
                Ok(Ok(offsets)) => {
                    return Ok(DeliveryReceipt {
                        topic: self.topic.clone(),
                        partition: *partition_id,
                        offset: offsets.first().copied().unwrap_or(-1),
                    });
                }
                Ok(Err(e)) => SinkError::Kafka(e),
                Err(_) => SinkError::Timeout(self.send_timeout),
            };

            if attempt >= max_attempts {
                return Err(error);
            }

            tracing::debug!(
                "Delivery attempt {}/{} to {} failed: {}",
                attempt,
                max_attempts,
                self.topic,
                error
            );
            tokio::time::sleep(self.retry_backoff).await;
        }
    }

    async fn close(&mut self) {
        self.partitions.clear();
        self.client = None;
    }

    fn describe(&self) -> String {
        format!("{} (topic {})", self.brokers.join(","), self.topic)
    }
}
