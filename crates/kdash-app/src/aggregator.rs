//! Metadata aggregation
//!
//! Turns independent broker lookups into a [`TopicReport`]. Configuration
//! and the partition index set are required; every per-partition field is
//! best-effort and degrades to unavailable on failure or timeout.

use std::future::Future;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};

use kdash_broker::BrokerClient;
use kdash_core::prelude::*;
use kdash_core::{
    OffsetPosition, PartitionField, PartitionInfo, PartitionQueryFailure, TopicReport,
    TopicSummary,
};

/// Tuning for report builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Bound on each individual broker lookup
    pub request_timeout: Duration,
    /// Partitions fetched at once
    pub concurrency: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            concurrency: 8,
        }
    }
}

/// List topics with their partition counts, in broker order.
pub async fn list_topic_summaries<C: BrokerClient>(client: &C) -> Result<Vec<TopicSummary>> {
    let topics = client
        .list_topics()
        .await
        .map_err(Error::topic_list_failed)?;

    let mut summaries = Vec::with_capacity(topics.len());
    for name in topics {
        let partitions = client
            .partitions(&name)
            .await
            .map_err(|e| Error::topic_list_failed(format!("{name}: {e}")))?;
        summaries.push(TopicSummary::new(name, partitions.len()));
    }

    debug!(count = summaries.len(), "Loaded topic summaries");
    Ok(summaries)
}

/// Build the full report for one topic.
///
/// Fails with [`Error::ConfigFetchFailed`] before any partition lookup if the
/// configuration is unavailable, and with [`Error::PartitionListFailed`] if
/// the partition set is. Per-partition failures are recorded in
/// [`TopicReport::failures`] instead.
pub async fn build_report<C: BrokerClient>(
    client: &C,
    topic: &str,
    options: &FetchOptions,
) -> Result<TopicReport> {
    debug!(topic, "Building topic report");
    let timeout = options.request_timeout;

    let config = bounded(timeout, "describe config", client.describe_config(topic))
        .await
        .map_err(|e| Error::config_fetch_failed(topic, e))
        .with_context(|| format!("Report for '{topic}' aborted"))?;

    let mut indices = bounded(timeout, "list partitions", client.partitions(topic))
        .await
        .map_err(|e| Error::partition_list_failed(topic, e))
        .with_context(|| format!("Report for '{topic}' aborted"))?;
    indices.sort_unstable();

    let fetched: Vec<(PartitionInfo, Vec<PartitionQueryFailure>)> = stream::iter(indices)
        .map(|partition| fetch_partition(client, topic, partition, timeout))
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    let mut partitions = Vec::with_capacity(fetched.len());
    let mut failures = Vec::new();
    for (info, mut partition_failures) in fetched {
        partitions.push(info);
        failures.append(&mut partition_failures);
    }
    partitions.sort_by_key(|p| p.partition);

    if !failures.is_empty() {
        warn!(
            topic,
            failures = failures.len(),
            "Report built with unavailable fields"
        );
    }
    debug!(topic, partitions = partitions.len(), "Report built");

    Ok(TopicReport {
        topic: topic.to_string(),
        config,
        partitions,
        failures,
    })
}

async fn fetch_partition<C: BrokerClient>(
    client: &C,
    topic: &str,
    partition: i32,
    timeout: Duration,
) -> (PartitionInfo, Vec<PartitionQueryFailure>) {
    let (oldest, newest, leader, replicas, isr) = tokio::join!(
        bounded(
            timeout,
            "oldest offset",
            client.get_offset(topic, partition, OffsetPosition::Oldest)
        ),
        bounded(
            timeout,
            "newest offset",
            client.get_offset(topic, partition, OffsetPosition::Newest)
        ),
        bounded(timeout, "leader", client.leader(topic, partition)),
        bounded(timeout, "replicas", client.replicas(topic, partition)),
        bounded(
            timeout,
            "in-sync replicas",
            client.in_sync_replicas(topic, partition)
        ),
    );

    let mut failures = Vec::new();
    let mut degrade = |field: PartitionField, error: Error| {
        warn!(
            "{}",
            Error::partition_query_failed(topic, partition, field, &error)
        );
        failures.push(PartitionQueryFailure {
            partition,
            field,
            reason: error.to_string(),
        });
    };

    let info = PartitionInfo {
        partition,
        oldest_offset: oldest
            .map_err(|e| degrade(PartitionField::OldestOffset, e))
            .ok(),
        newest_offset: newest
            .map_err(|e| degrade(PartitionField::NewestOffset, e))
            .ok(),
        leader: leader.map_err(|e| degrade(PartitionField::Leader, e)).ok(),
        replicas: replicas
            .map_err(|e| degrade(PartitionField::Replicas, e))
            .ok(),
        in_sync_replicas: isr
            .map_err(|e| degrade(PartitionField::InSyncReplicas, e))
            .ok(),
    };

    (info, failures)
}

/// Bound a broker lookup by `timeout`, mapping expiry to [`Error::Timeout`].
async fn bounded<T>(
    timeout: Duration,
    operation: &str,
    lookup: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, lookup).await {
        Ok(result) => result,
        Err(_) => Err(Error::timeout(
            operation,
            u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}
