//! Command input bar
//!
//! Shows the `:` command buffer while typing, otherwise the latest status
//! message or a hint.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use kdash_app::state::{StatusMessage, UiMode};

use crate::theme::{palette, styles};

const PROMPT: &str = ": ";
const HINT: &str = "Press : for commands";

pub struct CommandBar<'a> {
    mode: UiMode,
    buffer: &'a str,
    status: Option<&'a StatusMessage>,
}

impl<'a> CommandBar<'a> {
    pub fn new(mode: UiMode, buffer: &'a str) -> Self {
        Self {
            mode,
            buffer,
            status: None,
        }
    }

    pub fn status(mut self, status: Option<&'a StatusMessage>) -> Self {
        self.status = status;
        self
    }

    /// Where the terminal cursor belongs, if the bar is taking input
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if self.mode != UiMode::CommandInput || area.width < 2 || area.height < 3 {
            return None;
        }
        // Display columns, so wide characters move the cursor by two
        let offset = u16::try_from(self.line().width()).unwrap_or(u16::MAX);
        let max_x = area.x + area.width - 2;
        Some(Position::new(
            (area.x + 1).saturating_add(offset).min(max_x),
            area.y + 1,
        ))
    }

    fn line(&self) -> Line<'a> {
        match (self.mode, self.status) {
            (UiMode::CommandInput, _) => Line::from(vec![
                Span::styled(PROMPT, styles::accent()),
                Span::styled(self.buffer, styles::text_primary()),
            ]),
            (UiMode::Normal, Some(status)) if status.is_error => {
                Line::styled(status.text.as_str(), styles::status_red())
            }
            (UiMode::Normal, Some(status)) => {
                Line::styled(status.text.as_str(), styles::text_primary())
            }
            (UiMode::Normal, None) => Line::styled(HINT, styles::text_muted()),
        }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.mode == UiMode::CommandInput)
            .title(" Enter Command ")
            .style(Style::default().bg(palette::CARD_BG));

        Paragraph::new(self.line()).block(block).render(area, buf);
    }
}
