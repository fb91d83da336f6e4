//! Configuration types for the Kafka dashboard
//!
//! Defines:
//! - `Settings` - Global application settings (`config.toml`)
//! - `BrokerSettings` - Cluster connection and fetch tuning
//! - `UiSettings` - Detail panel preferences

use std::time::Duration;

use serde::{Deserialize, Serialize};

use kdash_broker::{ConnectionConfig, DEFAULT_BROKER};

use crate::aggregator::FetchOptions;

/// Lower bound for any broker request timeout
pub const MIN_REQUEST_TIMEOUT_MS: u64 = 100;

/// Application settings (`<config_dir>/kafka-dashboard/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub broker: BrokerSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    /// Replace the configured broker list with one given on the command line.
    ///
    /// An empty override keeps the configured list.
    pub fn with_broker_override(mut self, brokers: &[String]) -> Self {
        let brokers: Vec<String> = brokers
            .iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        if !brokers.is_empty() {
            self.broker.brokers = brokers;
        }
        self
    }
}

/// Broker connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BrokerSettings {
    /// Bootstrap addresses (`host:port`)
    #[serde(default = "default_brokers")]
    pub brokers: Vec<String>,

    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Per-request timeout; also bounds each partition field lookup
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Partitions fetched at once while building a report
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Show `__`-prefixed internal topics in the list
    #[serde(default)]
    pub include_internal: bool,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            brokers: default_brokers(),
            client_id: default_client_id(),
            request_timeout_ms: default_request_timeout_ms(),
            fetch_concurrency: default_fetch_concurrency(),
            include_internal: false,
        }
    }
}

impl BrokerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(MIN_REQUEST_TIMEOUT_MS))
    }

    pub fn concurrency(&self) -> usize {
        self.fetch_concurrency.max(1)
    }

    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            brokers: self.brokers.clone(),
            client_id: self.client_id.clone(),
            request_timeout: self.request_timeout(),
            include_internal: self.include_internal,
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            request_timeout: self.request_timeout(),
            concurrency: self.concurrency(),
        }
    }
}

fn default_brokers() -> Vec<String> {
    vec![DEFAULT_BROKER.to_string()]
}

fn default_client_id() -> String {
    "kdash".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_fetch_concurrency() -> usize {
    8
}

fn default_true() -> bool {
    true
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Include the CONFIG section in the detail panel
    #[serde(default = "default_true")]
    pub show_config: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_config: default_true(),
        }
    }
}
