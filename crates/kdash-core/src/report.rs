//! Topic report model and its fixed-width text layout
//!
//! A [`TopicReport`] is a value: it is assembled once per describe request
//! and never mutated afterwards. [`format_report`] is the text contract
//! consumed both by the detail panel and by `kdash describe`.

use std::fmt::Write as _;

use serde::Serialize;

use crate::error::PartitionField;

/// Marker rendered in place of any field the broker failed to return.
pub const UNAVAILABLE: &str = "unavailable";

/// Header of the configuration section.
pub const CONFIG_HEADER: &str = "CONFIG            VALUE";

/// Header of the partition section.
pub const PARTITION_HEADER: &str = "PARTITION   OLDEST_OFFSET   NEWEST_OFFSET   EMPTY   LEADER           REPLICAS   IN_SYNC_REPLICAS";

/// One row of the topic list: a topic name and its partition count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    pub name: String,
    pub partition_count: usize,
}

impl TopicSummary {
    pub fn new(name: impl Into<String>, partition_count: usize) -> Self {
        Self {
            name: name.into(),
            partition_count,
        }
    }
}

/// A topic configuration entry, in the order the broker returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub name: String,
    pub value: String,
}

impl ConfigEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Metadata for a single partition.
///
/// Every broker-sourced field is optional: `None` means the lookup failed
/// and the field renders as [`UNAVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionInfo {
    pub partition: i32,
    /// Inclusive lower bound of the retained log
    pub oldest_offset: Option<i64>,
    /// Exclusive upper bound (next offset to be written)
    pub newest_offset: Option<i64>,
    /// Leader broker address (`host:port`)
    pub leader: Option<String>,
    pub replicas: Option<Vec<i32>>,
    pub in_sync_replicas: Option<Vec<i32>>,
}

impl PartitionInfo {
    /// A partition with no fields fetched yet.
    pub fn unavailable(partition: i32) -> Self {
        Self {
            partition,
            oldest_offset: None,
            newest_offset: None,
            leader: None,
            replicas: None,
            in_sync_replicas: None,
        }
    }

    /// Whether the partition holds no retained records.
    ///
    /// Compares against the retention floor, not zero: a trimmed partition
    /// with `oldest == newest == 10` is empty.
    pub fn is_empty(&self) -> Option<bool> {
        let oldest = self.oldest_offset?;
        let newest = self.newest_offset?;
        Some(newest - oldest == 0)
    }

    /// The seven display cells, in column order.
    pub fn cells(&self) -> [String; 7] {
        [
            self.partition.to_string(),
            display_or_unavailable(self.oldest_offset),
            display_or_unavailable(self.newest_offset),
            display_or_unavailable(self.is_empty()),
            self.leader.clone().unwrap_or_else(|| UNAVAILABLE.to_string()),
            display_or_unavailable(self.replicas.as_ref().map(Vec::len)),
            display_or_unavailable(self.in_sync_replicas.as_ref().map(Vec::len)),
        ]
    }

    /// Format this partition as one fixed-width line (without newline).
    pub fn format_line(&self) -> String {
        let [partition, oldest, newest, empty, leader, replicas, isr] = self.cells();
        format!(
            "{:<11} {:<14} {:<14} {:<6} {:<15} {:<9} {:<16}",
            partition, oldest, newest, empty, leader, replicas, isr
        )
    }
}

fn display_or_unavailable<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// A partition-level lookup that failed while building a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionQueryFailure {
    pub partition: i32,
    pub field: PartitionField,
    pub reason: String,
}

/// Everything the dashboard shows about one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicReport {
    pub topic: String,
    pub config: Vec<ConfigEntry>,
    /// Ordered by ascending partition index
    pub partitions: Vec<PartitionInfo>,
    /// Lookups that degraded to [`UNAVAILABLE`]
    pub failures: Vec<PartitionQueryFailure>,
}

impl TopicReport {
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Render the configuration section: header plus one line per entry.
pub fn format_config_section(report: &TopicReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{CONFIG_HEADER}");
    for entry in &report.config {
        let _ = writeln!(out, "{:<18} {}", entry.name, entry.value);
    }
    out
}

/// Render the partition section: header plus one line per partition.
pub fn format_partition_section(report: &TopicReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{PARTITION_HEADER}");
    for partition in &report.partitions {
        let _ = writeln!(out, "{}", partition.format_line());
    }
    out
}

/// Render the full report as plain text.
pub fn format_report(report: &TopicReport) -> String {
    let mut out = format_config_section(report);
    out.push('\n');
    out.push_str(&format_partition_section(report));
    out
}
