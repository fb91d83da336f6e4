//! Topic detail panel widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

use kdash_app::state::DetailContent;
use kdash_core::{
    format_config_section, format_partition_section, TopicReport, CONFIG_HEADER, PARTITION_HEADER,
};

use crate::theme::{palette, styles};

/// Scrollable panel showing a report, the edit placeholder, or an error
pub struct DetailPanel<'a> {
    content: &'a DetailContent,
    scroll: u16,
    show_config: bool,
    focused: bool,
}

impl<'a> DetailPanel<'a> {
    pub fn new(content: &'a DetailContent) -> Self {
        Self {
            content,
            scroll: 0,
            show_config: true,
            focused: false,
        }
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn show_config(mut self, show_config: bool) -> Self {
        self.show_config = show_config;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(" Topic Details ", styles::accent())];
        if let DetailContent::Report(report) = self.content {
            if report.is_degraded() {
                spans.push(Span::styled(
                    format!("({} unavailable) ", report.failures.len()),
                    styles::status_yellow(),
                ));
            }
        }
        Line::from(spans)
    }

    fn body(&self) -> Text<'static> {
        match self.content {
            DetailContent::Empty => Text::default(),
            DetailContent::Loading { topic } => {
                Text::styled(format!("Loading {topic}..."), styles::text_muted())
            }
            DetailContent::Report(report) => report_text(report, self.show_config),
            DetailContent::EditPlaceholder { topic } => Text::from(Line::from(vec![
                Span::styled("Editing topic: ", styles::status_yellow()),
                Span::styled(topic.clone(), styles::text_primary()),
            ])),
            DetailContent::Error { message } => Text::styled(message.clone(), styles::status_red()),
        }
    }
}

/// Report text with section headers highlighted
fn report_text(report: &TopicReport, show_config: bool) -> Text<'static> {
    let mut text = String::new();
    if show_config {
        text.push_str(&format_config_section(report));
        text.push('\n');
    }
    text.push_str(&format_partition_section(report));

    text.lines()
        .map(|line| {
            let style = if line == CONFIG_HEADER || line == PARTITION_HEADER {
                styles::heading()
            } else {
                styles::text_primary()
            };
            Line::styled(line.to_string(), style)
        })
        .collect()
}

impl Widget for DetailPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(self.title())
            .style(Style::default().bg(palette::CARD_BG));

        Paragraph::new(self.body())
            .block(block)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
