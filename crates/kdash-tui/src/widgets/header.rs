//! Header bar widget
//!
//! Shows the title, the bootstrap brokers, connection phase and the time of
//! the last topic listing.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use kdash_core::AppPhase;

use crate::theme::{palette, styles};

/// Main header: `Kafka CLI - Brokers: a, b`
pub struct MainHeader<'a> {
    brokers: &'a [String],
    phase: AppPhase,
    refreshing: bool,
    last_refresh: Option<DateTime<Local>>,
}

impl<'a> MainHeader<'a> {
    pub fn new(brokers: &'a [String]) -> Self {
        Self {
            brokers,
            phase: AppPhase::Running,
            refreshing: false,
            last_refresh: None,
        }
    }

    pub fn phase(mut self, phase: AppPhase, refreshing: bool) -> Self {
        self.phase = phase;
        self.refreshing = refreshing;
        self
    }

    pub fn last_refresh(mut self, at: Option<DateTime<Local>>) -> Self {
        self.last_refresh = at;
        self
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = Line::from(vec![
            Span::styled("Kafka CLI", styles::heading()),
            Span::styled(" - Brokers: ", styles::text_primary()),
            Span::styled(self.brokers.join(", "), styles::accent()),
        ]);
        Paragraph::new(title).render(inner, buf);

        let (icon, label, style) = styles::phase_indicator(&self.phase, self.refreshing);
        let mut status = vec![Span::styled(format!("{icon} {label}"), style)];
        if let Some(at) = self.last_refresh {
            status.push(Span::styled(
                format!("  {}", at.format("%H:%M:%S")),
                styles::text_muted(),
            ));
        }
        let status = Line::from(status);
        let width = status.width() as u16;
        let title_width = Line::from(format!(
            "Kafka CLI - Brokers: {}",
            self.brokers.join(", ")
        ))
        .width() as u16;

        // Right-aligned status only when it doesn't overlap the title
        if title_width + width + 2 <= inner.width {
            let status_area = Rect {
                x: inner.x + inner.width - width,
                y: inner.y,
                width,
                height: 1,
            };
            Paragraph::new(status).render(status_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use chrono::TimeZone;

    #[test]
    fn test_header_lists_brokers() {
        let mut term = TestTerminal::new();
        let brokers = vec!["kafka-1:9092".to_string(), "kafka-2:9092".to_string()];

        term.render_widget(MainHeader::new(&brokers), Rect::new(0, 0, 80, 3));

        assert!(term.line_contains(1, "Kafka CLI - Brokers: kafka-1:9092, kafka-2:9092"));
    }

    #[test]
    fn test_header_shows_phase_and_refresh_time() {
        let mut term = TestTerminal::new();
        let brokers = vec!["localhost:9092".to_string()];
        let at = Local.with_ymd_and_hms(2026, 1, 2, 13, 45, 7).unwrap();

        term.render_widget(
            MainHeader::new(&brokers)
                .phase(AppPhase::Running, false)
                .last_refresh(Some(at)),
            Rect::new(0, 0, 80, 3),
        );

        assert!(term.line_contains(1, "Connected"));
        assert!(term.line_contains(1, "13:45:07"));
    }

    #[test]
    fn test_status_hidden_when_too_narrow() {
        let mut term = TestTerminal::compact();
        let brokers = vec!["a-very-long-broker-name:9092".to_string()];

        term.render_widget(MainHeader::new(&brokers), Rect::new(0, 0, 40, 3));

        assert!(!term.buffer_contains("Connected"));
    }
}
