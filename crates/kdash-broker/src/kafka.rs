//! Kafka implementation of [`BrokerClient`] backed by librdkafka
//!
//! Metadata and watermark lookups are blocking librdkafka calls, so they run
//! on the blocking pool. Topic configuration goes through the admin API,
//! which is already asynchronous.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rdkafka::admin::{AdminClient, AdminOptions, ResourceSpecifier};
use rdkafka::client::DefaultClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{BaseConsumer, Consumer};
use rdkafka::metadata::Metadata;

use kdash_core::prelude::*;
use kdash_core::{ConfigEntry, OffsetPosition};

use crate::client::{is_internal_topic, BrokerClient, ConnectionConfig};

/// Partition metadata detached from librdkafka's borrowed structures
#[derive(Debug, Clone)]
struct PartitionSnapshot {
    id: i32,
    leader: i32,
    replicas: Vec<i32>,
    isr: Vec<i32>,
}

#[derive(Debug, Clone)]
struct TopicSnapshot {
    partitions: Vec<PartitionSnapshot>,
    /// Broker id -> `host:port`
    brokers: HashMap<i32, String>,
}

impl TopicSnapshot {
    fn from_metadata(metadata: &Metadata, topic: &str) -> Result<Self> {
        let Some(entry) = metadata.topics().iter().find(|t| t.name() == topic) else {
            return Err(Error::broker(format!("topic '{topic}' not found")));
        };
        if let Some(err) = entry.error() {
            return Err(Error::broker(format!("topic '{topic}': {err:?}")));
        }

        let partitions = entry
            .partitions()
            .iter()
            .map(|p| PartitionSnapshot {
                id: p.id(),
                leader: p.leader(),
                replicas: p.replicas().to_vec(),
                isr: p.isr().to_vec(),
            })
            .collect();

        let brokers = metadata
            .brokers()
            .iter()
            .map(|b| (b.id(), format!("{}:{}", b.host(), b.port())))
            .collect();

        Ok(Self {
            partitions,
            brokers,
        })
    }

    fn partition(&self, topic: &str, partition: i32) -> Result<&PartitionSnapshot> {
        self.partitions
            .iter()
            .find(|p| p.id == partition)
            .ok_or_else(|| Error::broker(format!("partition {topic}/{partition} not found")))
    }

    /// `host:port` of the partition leader
    fn leader_address(&self, topic: &str, partition: i32) -> Result<String> {
        let leader = self.partition(topic, partition)?.leader;
        if leader < 0 {
            return Err(Error::broker(format!(
                "partition {topic}/{partition} has no leader"
            )));
        }
        self.brokers
            .get(&leader)
            .cloned()
            .ok_or_else(|| Error::broker(format!("leader broker {leader} not in metadata")))
    }
}

/// Latest partition metadata per topic.
///
/// `partitions` always refetches and replaces the entry, so every report
/// build starts from fresh metadata; the leader, replica and ISR lookups of
/// that build read it back instead of issuing their own requests.
#[derive(Debug, Default)]
struct SnapshotCache {
    topics: Mutex<HashMap<String, Arc<TopicSnapshot>>>,
}

impl SnapshotCache {
    fn store(&self, topic: &str, snapshot: TopicSnapshot) -> Arc<TopicSnapshot> {
        let snapshot = Arc::new(snapshot);
        if let Ok(mut topics) = self.topics.lock() {
            topics.insert(topic.to_string(), Arc::clone(&snapshot));
        }
        snapshot
    }

    fn get(&self, topic: &str) -> Option<Arc<TopicSnapshot>> {
        self.topics.lock().ok()?.get(topic).cloned()
    }
}

/// A live connection to a Kafka cluster.
///
/// Dropping the client closes its broker connections.
pub struct KafkaClient {
    config: ConnectionConfig,
    consumer: Arc<BaseConsumer>,
    admin: AdminClient<DefaultClientContext>,
    snapshots: SnapshotCache,
}

impl std::fmt::Debug for KafkaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaClient")
            .field("brokers", &self.config.brokers)
            .field("client_id", &self.config.client_id)
            .finish()
    }
}

impl KafkaClient {
    /// Connect to the cluster and verify it answers a metadata request.
    ///
    /// Returns [`Error::ConnectionFailed`] when no broker is reachable.
    pub async fn connect(config: ConnectionConfig) -> Result<Self> {
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", config.bootstrap_servers())
            .set("client.id", &config.client_id)
            .set(
                "socket.timeout.ms",
                config.request_timeout.as_millis().to_string(),
            );

        let consumer: BaseConsumer = client_config
            .create()
            .map_err(|e| Error::connection_failed(&config.brokers, e))?;
        let admin: AdminClient<DefaultClientContext> = client_config
            .create()
            .map_err(|e| Error::connection_failed(&config.brokers, e))?;

        let consumer = Arc::new(consumer);
        let probe = Arc::clone(&consumer);
        let timeout = config.request_timeout;
        let broker_count = tokio::task::spawn_blocking(move || {
            probe
                .fetch_metadata(None, timeout)
                .map(|metadata| metadata.brokers().len())
        })
        .await
        .map_err(|e| Error::connection_failed(&config.brokers, e))?
        .map_err(|e| Error::connection_failed(&config.brokers, e))?;

        info!(
            brokers = %config.bootstrap_servers(),
            broker_count,
            "Connected to Kafka cluster"
        );

        Ok(Self {
            config,
            consumer,
            admin,
            snapshots: SnapshotCache::default(),
        })
    }

    /// Run a blocking librdkafka call on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&BaseConsumer, Duration) -> Result<T> + Send + 'static,
    {
        let consumer = Arc::clone(&self.consumer);
        let timeout = self.config.request_timeout;
        tokio::task::spawn_blocking(move || f(&consumer, timeout))
            .await
            .map_err(|e| Error::broker(format!("broker task failed: {e}")))?
    }

    /// Fetch a topic's partition metadata and make it the current snapshot.
    async fn refresh_snapshot(&self, topic: &str) -> Result<Arc<TopicSnapshot>> {
        let name = topic.to_string();
        let snapshot = self
            .blocking(move |consumer, timeout| {
                let metadata = consumer
                    .fetch_metadata(Some(&name), timeout)
                    .map_err(|e| Error::broker(e.to_string()))?;
                TopicSnapshot::from_metadata(&metadata, &name)
            })
            .await?;
        Ok(self.snapshots.store(topic, snapshot))
    }

    /// The current snapshot, fetched if `partitions` has not run for `topic`.
    async fn snapshot(&self, topic: &str) -> Result<Arc<TopicSnapshot>> {
        match self.snapshots.get(topic) {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh_snapshot(topic).await,
        }
    }
}

impl BrokerClient for KafkaClient {
    async fn list_topics(&self) -> Result<Vec<String>> {
        let include_internal = self.config.include_internal;
        let topics = self
            .blocking(move |consumer, timeout| {
                let metadata = consumer
                    .fetch_metadata(None, timeout)
                    .map_err(|e| Error::broker(e.to_string()))?;
                Ok(metadata
                    .topics()
                    .iter()
                    .map(|t| t.name().to_string())
                    .filter(|name| include_internal || !is_internal_topic(name))
                    .collect::<Vec<_>>())
            })
            .await?;

        debug!(count = topics.len(), "Listed topics");
        Ok(topics)
    }

    async fn partitions(&self, topic: &str) -> Result<Vec<i32>> {
        let snapshot = self.refresh_snapshot(topic).await?;
        Ok(snapshot.partitions.iter().map(|p| p.id).collect())
    }

    async fn get_offset(
        &self,
        topic: &str,
        partition: i32,
        position: OffsetPosition,
    ) -> Result<i64> {
        let name = topic.to_string();
        let (low, high) = self
            .blocking(move |consumer, timeout| {
                consumer
                    .fetch_watermarks(&name, partition, timeout)
                    .map_err(|e| Error::broker(e.to_string()))
            })
            .await?;

        Ok(match position {
            OffsetPosition::Oldest => low,
            OffsetPosition::Newest => high,
        })
    }

    async fn leader(&self, topic: &str, partition: i32) -> Result<String> {
        self.snapshot(topic).await?.leader_address(topic, partition)
    }

    async fn replicas(&self, topic: &str, partition: i32) -> Result<Vec<i32>> {
        let snapshot = self.snapshot(topic).await?;
        Ok(snapshot.partition(topic, partition)?.replicas.clone())
    }

    async fn in_sync_replicas(&self, topic: &str, partition: i32) -> Result<Vec<i32>> {
        let snapshot = self.snapshot(topic).await?;
        Ok(snapshot.partition(topic, partition)?.isr.clone())
    }

    async fn describe_config(&self, topic: &str) -> Result<Vec<ConfigEntry>> {
        let opts = AdminOptions::new().request_timeout(Some(self.config.request_timeout));
        let resource = ResourceSpecifier::Topic(topic);

        let results = self
            .admin
            .describe_configs(&[resource], &opts)
            .await
            .map_err(|e| Error::broker(e.to_string()))?;

        let resource = results
            .into_iter()
            .next()
            .ok_or_else(|| Error::broker("empty describe-configs response"))?
            .map_err(|code| Error::broker(code.to_string()))?;

        Ok(resource
            .entries
            .into_iter()
            .map(|entry| ConfigEntry::new(entry.name, entry.value.unwrap_or_default()))
            .collect())
    }
}
