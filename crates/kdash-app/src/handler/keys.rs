//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(key),
        UiMode::CommandInput => handle_key_command_input(state, key),
    }
}

fn handle_key_normal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        // Table navigation
        InputKey::Up | InputKey::Char('k') => Some(Message::CursorUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::CursorDown),
        InputKey::Home | InputKey::Char('g') => Some(Message::CursorTop),
        InputKey::End | InputKey::Char('G') => Some(Message::CursorBottom),
        InputKey::Enter => Some(Message::SelectRow),

        InputKey::Char('e') => Some(Message::EditSelected),
        InputKey::Char('c') => Some(Message::ClearDetail),
        InputKey::Char('r') => Some(Message::RefreshTopics),

        // Detail panel
        InputKey::PageUp => Some(Message::ScrollDetailUp),
        InputKey::PageDown => Some(Message::ScrollDetailDown),

        InputKey::Char(':') => Some(Message::StartCommand),

        _ => None,
    }
}

fn handle_key_command_input(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Esc => Some(Message::CancelCommand),
        InputKey::Enter => Some(Message::SubmitCommand),

        // Delete character
        InputKey::Backspace => {
            let mut text = state.command.clone();
            text.pop();
            Some(Message::CommandInput { text })
        }

        // Clear all input
        InputKey::CharCtrl('u') => Some(Message::CommandInput {
            text: String::new(),
        }),

        InputKey::Char(c) => {
            let mut text = state.command.clone();
            text.push(c);
            Some(Message::CommandInput { text })
        }

        _ => None,
    }
}
