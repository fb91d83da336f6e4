//! Topic table widget
//!
//! Row 0 is the `Topic Name | PARTITIONS` header; topics follow in broker
//! order with the cursor row highlighted.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    text::Line,
    widgets::{Cell, Row, StatefulWidget, Table, TableState, Widget},
};

use kdash_app::state::TopicTable;

use crate::theme::{palette, styles};

pub struct TopicTableView<'a> {
    table: &'a TopicTable,
    focused: bool,
}

impl<'a> TopicTableView<'a> {
    pub fn new(table: &'a TopicTable) -> Self {
        Self {
            table,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TopicTableView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(" Topics ")
            .style(Style::default().bg(palette::CARD_BG));

        let inner = block.inner(area);
        let header = Row::new(vec![Cell::from("Topic Name"), Cell::from("PARTITIONS")])
            .style(styles::heading());

        let rows = self.table.topics().iter().map(|topic| {
            Row::new(vec![
                Cell::from(topic.name.as_str()),
                Cell::from(topic.partition_count.to_string()),
            ])
            .style(styles::text_primary())
        });

        let widths = [Constraint::Min(20), Constraint::Length(10)];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(styles::focused_selected());

        // TableState indexes data rows; drawn row N is topic N-1
        let mut state =
            TableState::default().with_selected(self.table.selected_row().map(|row| row - 1));
        StatefulWidget::render(table, area, buf, &mut state);

        // Header stays at row 0 with the placeholder beneath it
        if self.table.is_empty() && inner.height > 1 {
            let placeholder = Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            };
            Line::styled("No topics", styles::text_muted()).render(placeholder, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use kdash_core::TopicSummary;

    fn table() -> TopicTable {
        TopicTable::new(vec![
            TopicSummary::new("orders", 3),
            TopicSummary::new("payments", 1),
        ])
    }

    #[test]
    fn test_header_then_topics_in_order() {
        let mut term = TestTerminal::new();
        let table = table();

        term.render_widget(TopicTableView::new(&table), Rect::new(0, 0, 80, 8));

        assert!(term.line_contains(1, "Topic Name"));
        assert!(term.line_contains(1, "PARTITIONS"));
        assert!(term.line_contains(2, "orders"));
        assert!(term.line_contains(2, "3"));
        assert!(term.line_contains(3, "payments"));
        assert!(term.line_contains(3, "1"));
    }

    #[test]
    fn test_cursor_row_is_highlighted() {
        let mut term = TestTerminal::new();
        let mut table = table();
        table.move_down();

        term.render_widget(TopicTableView::new(&table), Rect::new(0, 0, 80, 8));

        let cell = &term.buffer()[(1, 3)];
        assert_eq!(cell.bg, palette::ACCENT);
        let cell = &term.buffer()[(1, 2)];
        assert_ne!(cell.bg, palette::ACCENT);
    }

    #[test]
    fn test_empty_table_shows_placeholder() {
        let mut term = TestTerminal::new();
        let table = TopicTable::default();

        term.render_widget(TopicTableView::new(&table), Rect::new(0, 0, 80, 5));

        assert!(term.line_contains(1, "Topic Name"));
        assert!(term.line_contains(1, "PARTITIONS"));
        assert!(term.line_contains(2, "No topics"));
    }
}
