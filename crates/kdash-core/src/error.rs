//! Application error types with rich context

use std::fmt;

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// A per-partition attribute fetched from the broker.
///
/// Used to classify partition-level failures, which degrade a single
/// field of a report instead of aborting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionField {
    OldestOffset,
    NewestOffset,
    Leader,
    Replicas,
    InSyncReplicas,
}

impl fmt::Display for PartitionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartitionField::OldestOffset => "oldest offset",
            PartitionField::NewestOffset => "newest offset",
            PartitionField::Leader => "leader",
            PartitionField::Replicas => "replicas",
            PartitionField::InSyncReplicas => "in-sync replicas",
        };
        f.write_str(name)
    }
}

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Broker Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Cannot connect to brokers {brokers}: {reason}")]
    ConnectionFailed { brokers: String, reason: String },

    #[error("Failed to list topics: {reason}")]
    TopicListFailed { reason: String },

    #[error("Failed to fetch configuration for topic '{topic}': {reason}")]
    ConfigFetchFailed { topic: String, reason: String },

    #[error("Failed to list partitions for topic '{topic}': {reason}")]
    PartitionListFailed { topic: String, reason: String },

    #[error("Failed to fetch {field} for {topic}/{partition}: {reason}")]
    PartitionQueryFailed {
        topic: String,
        partition: i32,
        field: PartitionField,
        reason: String,
    },

    #[error("Broker error: {message}")]
    Broker { message: String },

    #[error("{operation} timed out after {after_ms}ms")]
    Timeout { operation: String, after_ms: u64 },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn connection_failed(brokers: &[String], reason: impl fmt::Display) -> Self {
        Self::ConnectionFailed {
            brokers: brokers.join(","),
            reason: reason.to_string(),
        }
    }

    pub fn topic_list_failed(reason: impl fmt::Display) -> Self {
        Self::TopicListFailed {
            reason: reason.to_string(),
        }
    }

    pub fn config_fetch_failed(topic: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::ConfigFetchFailed {
            topic: topic.into(),
            reason: reason.to_string(),
        }
    }

    pub fn partition_list_failed(topic: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::PartitionListFailed {
            topic: topic.into(),
            reason: reason.to_string(),
        }
    }

    pub fn partition_query_failed(
        topic: impl Into<String>,
        partition: i32,
        field: PartitionField,
        reason: impl fmt::Display,
    ) -> Self {
        Self::PartitionQueryFailed {
            topic: topic.into(),
            partition,
            field,
            reason: reason.to_string(),
        }
    }

    pub fn broker(message: impl Into<String>) -> Self {
        Self::Broker {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, after_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            after_ms,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors are surfaced inline by the dashboard; the user
    /// retries by re-selecting the topic.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ConfigFetchFailed { .. }
                | Error::PartitionListFailed { .. }
                | Error::PartitionQueryFailed { .. }
                | Error::Broker { .. }
                | Error::Timeout { .. }
        )
    }

    /// Check if this error should abort startup
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConnectionFailed { .. } | Error::TopicListFailed { .. } | Error::TerminalInit(_)
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::config_fetch_failed("orders", "request timed out");
        assert_eq!(
            err.to_string(),
            "Failed to fetch configuration for topic 'orders': request timed out"
        );

        let err = Error::partition_query_failed("orders", 2, PartitionField::Leader, "no leader");
        assert_eq!(
            err.to_string(),
            "Failed to fetch leader for orders/2: no leader"
        );
    }

    #[test]
    fn test_connection_failed_joins_brokers() {
        let brokers = vec!["a:9092".to_string(), "b:9092".to_string()];
        let err = Error::connection_failed(&brokers, "all brokers down");
        assert!(err.to_string().contains("a:9092,b:9092"));
        assert!(err.to_string().contains("all brokers down"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::connection_failed(&[], "refused").is_fatal());
        assert!(Error::topic_list_failed("metadata timeout").is_fatal());
        assert!(Error::TerminalInit("no tty".into()).is_fatal());
        assert!(!Error::config_fetch_failed("t", "x").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::config_fetch_failed("t", "x").is_recoverable());
        assert!(Error::partition_list_failed("t", "x").is_recoverable());
        assert!(Error::timeout("leader lookup", 500).is_recoverable());
        assert!(Error::broker("transport").is_recoverable());
        assert!(!Error::connection_failed(&[], "refused").is_recoverable());
        assert!(!Error::config("bad toml").is_recoverable());
    }

    #[test]
    fn test_partition_field_display() {
        assert_eq!(PartitionField::OldestOffset.to_string(), "oldest offset");
        assert_eq!(PartitionField::InSyncReplicas.to_string(), "in-sync replicas");
    }

    #[test]
    fn test_result_ext_preserves_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = res.context("reading config").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
