//! Key hint footer

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use kdash_app::state::UiMode;

use crate::theme::styles;

const NORMAL_HINTS: &[(&str, &str)] = &[
    ("(q)", "Quit"),
    ("(Enter)", "Describe Topic"),
    ("(e)", "Edit Topic"),
    ("(c)", "Clear"),
    ("(r)", "Refresh"),
    ("(:)", "Command"),
];

const COMMAND_HINTS: &[(&str, &str)] = &[
    ("(Enter)", "Run"),
    ("(Esc)", "Cancel"),
    ("(Ctrl+C)", "Quit"),
];

pub struct Footer {
    mode: UiMode,
}

impl Footer {
    pub fn new(mode: UiMode) -> Self {
        Self { mode }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.mode {
            UiMode::Normal => NORMAL_HINTS,
            UiMode::CommandInput => COMMAND_HINTS,
        }
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (i, (key, label)) in self.hints().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {label}"), styles::text_muted()));
        }

        Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(styles::border_inactive()),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_normal_hints() {
        let mut term = TestTerminal::with_size(100, 2);
        term.render_widget(Footer::new(UiMode::Normal), Rect::new(0, 0, 100, 2));

        assert!(term.line_contains(1, "(q) Quit  (Enter) Describe Topic  (e) Edit Topic"));
        assert!(term.line_contains(1, "(:) Command"));
    }

    #[test]
    fn test_command_mode_hints() {
        let mut term = TestTerminal::with_size(80, 2);
        term.render_widget(Footer::new(UiMode::CommandInput), Rect::new(0, 0, 80, 2));

        assert!(term.line_contains(1, "(Esc) Cancel"));
        assert!(!term.buffer_contains("Edit Topic"));
    }
}
