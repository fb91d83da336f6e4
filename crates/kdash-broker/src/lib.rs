//! # kdash-broker - Kafka cluster access
//!
//! Defines the [`BrokerClient`] capability set the dashboard consumes and
//! its librdkafka implementation, [`KafkaClient`]. Tests use the in-memory
//! [`test_utils::FakeCluster`] instead.

pub mod client;
pub mod kafka;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{is_internal_topic, BrokerClient, ConnectionConfig, LocalBrokerClient, DEFAULT_BROKER};
pub use kafka::KafkaClient;
