//! In-memory cluster for tests
//!
//! [`FakeCluster`] implements [`BrokerClient`] from a static topology and can
//! be told to fail or stall individual calls. Every call is recorded so tests
//! can assert which lookups were (or were not) issued.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use kdash_core::prelude::*;
use kdash_core::{ConfigEntry, OffsetPosition};

use crate::client::{is_internal_topic, BrokerClient};

/// One broker lookup, as recorded by [`FakeCluster::calls`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BrokerCall {
    ListTopics,
    Partitions(String),
    Offset(String, i32, OffsetPosition),
    Leader(String, i32),
    Replicas(String, i32),
    InSyncReplicas(String, i32),
    DescribeConfig(String),
}

/// Partition layout of a fake topic
#[derive(Debug, Clone)]
pub struct FakePartition {
    pub id: i32,
    pub oldest: i64,
    pub newest: i64,
    pub leader: i32,
    pub replicas: Vec<i32>,
    pub isr: Vec<i32>,
}

impl FakePartition {
    /// A healthy partition led by broker 1 with a single replica
    pub fn new(id: i32, oldest: i64, newest: i64) -> Self {
        Self {
            id,
            oldest,
            newest,
            leader: 1,
            replicas: vec![1],
            isr: vec![1],
        }
    }

    pub fn with_leader(mut self, leader: i32) -> Self {
        self.leader = leader;
        self
    }

    pub fn with_replicas(mut self, replicas: Vec<i32>, isr: Vec<i32>) -> Self {
        self.replicas = replicas;
        self.isr = isr;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeTopic {
    pub name: String,
    pub config: Vec<ConfigEntry>,
    pub partitions: Vec<FakePartition>,
}

impl FakeTopic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_config(mut self, name: &str, value: &str) -> Self {
        self.config.push(ConfigEntry::new(name, value));
        self
    }

    pub fn with_partition(mut self, partition: FakePartition) -> Self {
        self.partitions.push(partition);
        self
    }

    /// `count` empty partitions numbered from zero
    pub fn with_empty_partitions(mut self, count: i32) -> Self {
        for id in 0..count {
            self.partitions.push(FakePartition::new(id, 0, 0));
        }
        self
    }
}

/// Scripted stand-in for a Kafka cluster
#[derive(Debug, Default)]
pub struct FakeCluster {
    brokers: HashMap<i32, String>,
    topics: Vec<FakeTopic>,
    include_internal: bool,
    failures: HashSet<BrokerCall>,
    stalls: HashMap<BrokerCall, Duration>,
    calls: Mutex<Vec<BrokerCall>>,
}

impl FakeCluster {
    /// A cluster with a single broker (id 1, `broker-1:9092`)
    pub fn new() -> Self {
        Self::default().with_broker(1, "broker-1:9092")
    }

    pub fn with_broker(mut self, id: i32, address: &str) -> Self {
        self.brokers.insert(id, address.to_string());
        self
    }

    pub fn with_topic(mut self, topic: FakeTopic) -> Self {
        self.topics.push(topic);
        self
    }

    pub fn with_internal_topics(mut self) -> Self {
        self.include_internal = true;
        self
    }

    /// Make `call` return a broker error
    pub fn fail_on(mut self, call: BrokerCall) -> Self {
        self.failures.insert(call);
        self
    }

    /// Make `call` sleep for `delay` before answering
    pub fn stall_on(mut self, call: BrokerCall, delay: Duration) -> Self {
        self.stalls.insert(call, delay);
        self
    }

    /// Calls received so far, in arrival order
    pub fn calls(&self) -> Vec<BrokerCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self, predicate: impl Fn(&BrokerCall) -> bool) -> usize {
        self.calls().iter().filter(|c| predicate(c)).count()
    }

    async fn record(&self, call: BrokerCall) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.clone());
        }
        if let Some(delay) = self.stalls.get(&call) {
            tokio::time::sleep(*delay).await;
        }
        if self.failures.contains(&call) {
            return Err(Error::broker(format!("injected failure: {call:?}")));
        }
        Ok(())
    }

    fn topic(&self, name: &str) -> Result<&FakeTopic> {
        self.topics
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::broker(format!("topic '{name}' not found")))
    }

    fn partition(&self, topic: &str, partition: i32) -> Result<&FakePartition> {
        self.topic(topic)?
            .partitions
            .iter()
            .find(|p| p.id == partition)
            .ok_or_else(|| Error::broker(format!("partition {topic}/{partition} not found")))
    }
}

impl BrokerClient for FakeCluster {
    async fn list_topics(&self) -> Result<Vec<String>> {
        self.record(BrokerCall::ListTopics).await?;
        Ok(self
            .topics
            .iter()
            .map(|t| t.name.clone())
            .filter(|name| self.include_internal || !is_internal_topic(name))
            .collect())
    }

    async fn partitions(&self, topic: &str) -> Result<Vec<i32>> {
        self.record(BrokerCall::Partitions(topic.to_string())).await?;
        Ok(self.topic(topic)?.partitions.iter().map(|p| p.id).collect())
    }

    async fn get_offset(
        &self,
        topic: &str,
        partition: i32,
        position: OffsetPosition,
    ) -> Result<i64> {
        self.record(BrokerCall::Offset(topic.to_string(), partition, position))
            .await?;
        let p = self.partition(topic, partition)?;
        Ok(match position {
            OffsetPosition::Oldest => p.oldest,
            OffsetPosition::Newest => p.newest,
        })
    }

    async fn leader(&self, topic: &str, partition: i32) -> Result<String> {
        self.record(BrokerCall::Leader(topic.to_string(), partition))
            .await?;
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

    async fn replicas(&self, topic: &str, partition: i32) -> Result<Vec<i32>> {
        self.record(BrokerCall::Replicas(topic.to_string(), partition))
            .await?;
        Ok(self.partition(topic, partition)?.replicas.clone())
    }

    async fn in_sync_replicas(&self, topic: &str, partition: i32) -> Result<Vec<i32>> {
        self.record(BrokerCall::InSyncReplicas(topic.to_string(), partition))
            .await?;
        Ok(self.partition(topic, partition)?.isr.clone())
    }

    async fn describe_config(&self, topic: &str) -> Result<Vec<ConfigEntry>> {
        self.record(BrokerCall::DescribeConfig(topic.to_string()))
            .await?;
        Ok(self.topic(topic)?.config.clone())
    }
}
