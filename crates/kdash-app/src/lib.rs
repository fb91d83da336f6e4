//! kdash-app - Application state and orchestration for the Kafka dashboard
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! topic/detail view state, the metadata aggregator that assembles topic
//! reports from broker lookups, configuration loading, and signal handling.

pub mod actions;
pub mod aggregator;
pub mod config;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use aggregator::{build_report, list_topic_summaries, FetchOptions};
pub use config::{load_settings, Settings};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use process::{process_message, ActionContext};
pub use state::{AppState, DetailContent, StatusMessage, UiMode, ViewState};
