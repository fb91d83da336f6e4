//! Configuration file parsing for the Kafka dashboard
//!
//! Supports `<config_dir>/kafka-dashboard/config.toml` or an explicit path.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings};
pub use types::*;
