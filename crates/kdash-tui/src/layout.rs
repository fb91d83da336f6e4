//! Screen layout definitions for the TUI
//!
//! Header, command bar, content and footer stacked vertically; the content
//! area stacks the topic table above the detail panel at a 1:2 ratio.

use ratatui::layout::{Constraint, Layout, Rect};

pub const HEADER_HEIGHT: u16 = 3;
pub const COMMAND_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 2;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and broker list
    pub header: Rect,
    /// Command input / status line
    pub command: Rect,
    /// Topic list
    pub table: Rect,
    /// Topic details
    pub detail: Rect,
    /// Key hints
    pub footer: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let [header, command, content, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(COMMAND_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    let [table, detail] =
        Layout::vertical([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)]).areas(content);

    ScreenAreas {
        header,
        command,
        table,
        detail,
        footer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rows() {
        let layout = create(Rect::new(0, 0, 80, 24));

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.command.height, 3);
        assert_eq!(layout.command.y, 3);
        assert_eq!(layout.footer.height, 2);
        assert_eq!(layout.footer.y, 22);
    }

    #[test]
    fn test_content_split_one_to_two() {
        let layout = create(Rect::new(0, 0, 80, 30));

        // 30 - 3 - 3 - 2 = 22 rows of content
        assert_eq!(layout.table.y, 6);
        assert_eq!(layout.table.height + layout.detail.height, 22);
        assert!(layout.detail.height >= 2 * layout.table.height - 1);
        assert_eq!(layout.detail.y, layout.table.y + layout.table.height);
    }

    #[test]
    fn test_full_width() {
        let layout = create(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.table.width, 80);
        assert_eq!(layout.detail.width, 80);
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let layout = create(Rect::new(0, 0, 10, 5));
        assert!(layout.header.height <= 5);
    }
}
