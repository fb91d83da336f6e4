//! Message types for the application (TEA pattern)

use kdash_core::{TopicReport, TopicSummary};

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Request to quit the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Topic Table
    // ─────────────────────────────────────────────────────────
    /// Move cursor up one row
    CursorUp,
    /// Move cursor down one row
    CursorDown,
    /// Jump to the first topic row
    CursorTop,
    /// Jump to the last topic row
    CursorBottom,
    /// Describe the topic under the cursor
    SelectRow,
    /// Open the edit placeholder for the topic under the cursor
    EditSelected,
    /// Re-list topics
    RefreshTopics,

    // ─────────────────────────────────────────────────────────
    // Detail Panel
    // ─────────────────────────────────────────────────────────
    /// Describe a topic by name
    DescribeTopic { topic: String },
    /// Open the edit placeholder for a topic by name
    EditTopic { topic: String },
    /// Clear the detail panel
    ClearDetail,
    ScrollDetailUp,
    ScrollDetailDown,

    // ─────────────────────────────────────────────────────────
    // Command Bar
    // ─────────────────────────────────────────────────────────
    /// Focus the command bar
    StartCommand,
    /// Replace the command buffer
    CommandInput { text: String },
    /// Run the command in the buffer
    SubmitCommand,
    /// Leave the command bar without running anything
    CancelCommand,

    // ─────────────────────────────────────────────────────────
    // Background Results
    // ─────────────────────────────────────────────────────────
    /// Topic list fetched
    TopicsLoaded { topics: Vec<TopicSummary> },
    /// Topic list fetch failed
    TopicsLoadFailed { message: String },
    /// Report for a describe request is ready
    TopicReportReady { report: TopicReport },
    /// Describe request failed before a report could be built
    TopicReportFailed { topic: String, message: String },
}
