//! Broker capability trait
//!
//! The dashboard only needs a handful of read-only lookups from the cluster.
//! Both the real Kafka client and the in-memory test cluster implement
//! [`BrokerClient`]; the aggregator is generic over it.

use std::time::Duration;

use kdash_core::prelude::*;
use kdash_core::{ConfigEntry, OffsetPosition};

/// Default bootstrap address when neither CLI nor config names one
pub const DEFAULT_BROKER: &str = "localhost:9092";

/// Read-only cluster lookups used by the dashboard
#[trait_variant::make(BrokerClient: Send)]
pub trait LocalBrokerClient {
    /// All topic names, in the order the broker returns them
    async fn list_topics(&self) -> Result<Vec<String>>;

    /// Partition indices of a topic
    async fn partitions(&self, topic: &str) -> Result<Vec<i32>>;

    /// Oldest or newest offset of one partition
    async fn get_offset(&self, topic: &str, partition: i32, position: OffsetPosition)
        -> Result<i64>;

    /// Network address (`host:port`) of the partition leader
    async fn leader(&self, topic: &str, partition: i32) -> Result<String>;

    /// Broker ids holding a replica, in broker order
    async fn replicas(&self, topic: &str, partition: i32) -> Result<Vec<i32>>;

    /// Broker ids of the in-sync replica set, in broker order
    async fn in_sync_replicas(&self, topic: &str, partition: i32) -> Result<Vec<i32>>;

    /// Topic configuration entries, in the order the broker returns them
    async fn describe_config(&self, topic: &str) -> Result<Vec<ConfigEntry>>;
}

/// Connection parameters for [`crate::KafkaClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Bootstrap broker addresses (`host:port`)
    pub brokers: Vec<String>,
    /// Client id reported to the cluster
    pub client_id: String,
    /// Upper bound for a single broker request
    pub request_timeout: Duration,
    /// Include topics whose names start with `__`
    pub include_internal: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            brokers: vec![DEFAULT_BROKER.to_string()],
            client_id: "kdash".to_string(),
            request_timeout: Duration::from_secs(5),
            include_internal: false,
        }
    }
}

impl ConnectionConfig {
    /// Comma-joined broker list as librdkafka expects it
    pub fn bootstrap_servers(&self) -> String {
        self.brokers.join(",")
    }
}

/// Whether a topic is a broker-internal one (`__consumer_offsets`, ...)
pub fn is_internal_topic(name: &str) -> bool {
    name.starts_with("__")
}
