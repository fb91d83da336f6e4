//! kdash-tui - Terminal UI for the Kafka dashboard
//!
//! Renders the topic table and detail panel with ratatui, polls crossterm
//! for key events and drives the kdash-app update loop.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run_dashboard;
