//! Core domain types

/// Lifecycle of the dashboard process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Topic list is being fetched
    #[default]
    Loading,
    /// Topic list shown, accepting input
    Running,
    /// Quit requested; the event loop exits after the current iteration
    Quitting,
}

/// Which end of a partition log an offset lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetPosition {
    /// Earliest retained offset (inclusive)
    Oldest,
    /// Next offset to be written (exclusive)
    Newest,
}
