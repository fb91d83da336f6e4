//! # kdash-core - Core Domain Types
//!
//! Foundation crate for the Kafka dashboard. Provides the topic report
//! model and its text layout, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies**.
//!
//! ## Public API
//!
//! ### Report model (`report`)
//! - [`TopicSummary`] - A topic name and partition count for the topic list
//! - [`TopicReport`] - Configuration and per-partition metadata of one topic
//! - [`PartitionInfo`] - Offsets, leader, replicas and ISR of one partition
//! - [`format_report()`] - Fixed-width text rendering of a report
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use kdash_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod report;
pub mod types;

/// Prelude for common imports used throughout all dashboard crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, PartitionField, Result, ResultExt};
pub use report::{
    format_config_section, format_partition_section, format_report, ConfigEntry, PartitionInfo,
    PartitionQueryFailure, TopicReport, TopicSummary, CONFIG_HEADER, PARTITION_HEADER,
    UNAVAILABLE,
};
pub use types::{AppPhase, OffsetPosition};
