//! Main update function - handles state transitions (TEA pattern)

use kdash_core::AppPhase;
use tracing::{debug, warn};

use crate::message::Message;
use crate::state::{AppState, DetailContent, StatusMessage, UiMode, ViewState};

use super::command::{parse_command, Command};
use super::keys::handle_key;
use super::{UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Topic Table
        // ─────────────────────────────────────────────────────────
        Message::CursorUp => {
            state.topics.move_up();
            UpdateResult::none()
        }
        Message::CursorDown => {
            state.topics.move_down();
            UpdateResult::none()
        }
        Message::CursorTop => {
            state.topics.move_top();
            UpdateResult::none()
        }
        Message::CursorBottom => {
            state.topics.move_bottom();
            UpdateResult::none()
        }

        Message::SelectRow => match state.topics.selected() {
            Some(topic) => UpdateResult::message(Message::DescribeTopic {
                topic: topic.name.clone(),
            }),
            None => UpdateResult::none(),
        },

        Message::EditSelected => match state.topics.selected() {
            Some(topic) => UpdateResult::message(Message::EditTopic {
                topic: topic.name.clone(),
            }),
            None => UpdateResult::none(),
        },

        Message::RefreshTopics => {
            if state.refreshing {
                return UpdateResult::none();
            }
            state.refreshing = true;
            state.status = Some(StatusMessage::info("Refreshing topics..."));
            UpdateResult::action(UpdateAction::RefreshTopics)
        }

        // ─────────────────────────────────────────────────────────
        // Detail Panel
        // ─────────────────────────────────────────────────────────
        Message::DescribeTopic { topic } => {
            state.pending_topic = Some(topic.clone());
            state.show_detail(DetailContent::Loading {
                topic: topic.clone(),
            });
            UpdateResult::action(UpdateAction::DescribeTopic { topic })
        }

        Message::EditTopic { topic } => {
            state.pending_topic = None;
            state.show_detail(DetailContent::EditPlaceholder {
                topic: topic.clone(),
            });
            state.view = ViewState::Edit { topic };
            UpdateResult::none()
        }

        Message::ClearDetail => {
            state.pending_topic = None;
            state.show_detail(DetailContent::Empty);
            if let Some(topic) = state.view.topic() {
                state.view = ViewState::Detail {
                    topic: topic.to_string(),
                };
            }
            UpdateResult::none()
        }

        Message::ScrollDetailUp => {
            state.scroll_detail_up();
            UpdateResult::none()
        }
        Message::ScrollDetailDown => {
            state.scroll_detail_down();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Command Bar
        // ─────────────────────────────────────────────────────────
        Message::StartCommand => {
            state.ui_mode = UiMode::CommandInput;
            state.command.clear();
            state.status = None;
            UpdateResult::none()
        }

        Message::CommandInput { text } => {
            state.command = text;
            UpdateResult::none()
        }

        Message::CancelCommand => {
            state.ui_mode = UiMode::Normal;
            state.command.clear();
            UpdateResult::none()
        }

        Message::SubmitCommand => {
            state.ui_mode = UiMode::Normal;
            let input = std::mem::take(&mut state.command);
            if input.trim().is_empty() {
                return UpdateResult::none();
            }
            handle_command(state, &input)
        }

        // ─────────────────────────────────────────────────────────
        // Background Results
        // ─────────────────────────────────────────────────────────
        Message::TopicsLoaded { topics } => {
            let count = topics.len();
            state.set_topics(topics);
            state.status = Some(StatusMessage::info(format!("Loaded {count} topics")));
            UpdateResult::none()
        }

        Message::TopicsLoadFailed { message } => {
            state.refreshing = false;
            state.status = Some(StatusMessage::error(message));
            UpdateResult::none()
        }

        Message::TopicReportReady { report } => {
            if state.pending_topic.as_deref() != Some(report.topic.as_str()) {
                debug!(topic = %report.topic, "Dropping stale topic report");
                return UpdateResult::none();
            }
            state.pending_topic = None;
            state.view = ViewState::Detail {
                topic: report.topic.clone(),
            };
            state.show_detail(DetailContent::Report(report));
            UpdateResult::none()
        }

        Message::TopicReportFailed { topic, message } => {
            if state.pending_topic.as_deref() != Some(topic.as_str()) {
                debug!(topic = %topic, "Dropping stale topic report failure");
                return UpdateResult::none();
            }
            warn!("Describe failed for '{}': {}", topic, message);
            state.pending_topic = None;
            state.show_detail(DetailContent::Error { message });
            UpdateResult::none()
        }
    }
}

fn handle_command(state: &mut AppState, input: &str) -> UpdateResult {
    let command = match parse_command(input) {
        Ok(command) => command,
        Err(message) => {
            state.status = Some(StatusMessage::error(message));
            return UpdateResult::none();
        }
    };

    match command {
        Command::Describe(topic) | Command::Edit(topic) if !state.topics.contains(&topic) => {
            state.status = Some(StatusMessage::error(format!("Unknown topic: {topic}")));
            UpdateResult::none()
        }
        Command::Describe(topic) => UpdateResult::message(Message::DescribeTopic { topic }),
        Command::Edit(topic) => UpdateResult::message(Message::EditTopic { topic }),
        Command::Clear => UpdateResult::message(Message::ClearDetail),
        Command::Refresh => UpdateResult::message(Message::RefreshTopics),
        Command::Quit => UpdateResult::message(Message::Quit),
    }
}
