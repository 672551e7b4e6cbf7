//! Forwarding collected records to the message queue
//!
//! Every successful station list (one per city) and station detail (one per
//! station) is wrapped in an [`OutboundMessage`] envelope and handed to a
//! [`Publisher`] as soon as it is fetched. The publisher owns a
//! [`MessageSink`]; in production that is the Kafka-backed [`KafkaSink`].

mod kafka;
mod message;
mod publisher;
mod sink;

pub use kafka::KafkaSink;
pub use message::{Category, OutboundMessage, TIMESTAMP_FORMAT};
pub use publisher::{PublishError, Publisher};
pub use sink::{DeliveryReceipt, MessageSink, SinkError};
