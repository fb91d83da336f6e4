//! Application state (Model in TEA pattern)

use chrono::{DateTime, Local};

use kdash_core::{
    format_config_section, format_partition_section, AppPhase, TopicReport, TopicSummary,
};

use crate::config::Settings;

/// Lines moved by one PageUp/PageDown in the detail panel
pub const DETAIL_PAGE: u16 = 10;

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Keys are shortcuts
    #[default]
    Normal,

    /// Keys are typed into the command bar
    CommandInput,
}

/// Which panel is active, and for which topic
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    List,
    Detail {
        topic: String,
    },
    Edit {
        topic: String,
    },
}

impl ViewState {
    /// The topic the view is about, if any
    pub fn topic(&self) -> Option<&str> {
        match self {
            ViewState::List => None,
            ViewState::Detail { topic } | ViewState::Edit { topic } => Some(topic),
        }
    }
}

/// What the detail panel shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailContent {
    #[default]
    Empty,
    /// A describe request is in flight
    Loading { topic: String },
    Report(TopicReport),
    /// Text shown by the edit placeholder
    EditPlaceholder { topic: String },
    /// A describe request failed
    Error { message: String },
}

impl DetailContent {
    pub fn edit_placeholder_text(topic: &str) -> String {
        format!("Editing topic: {topic}")
    }

    /// Number of lines the detail panel draws for this content
    pub fn line_count(&self, show_config: bool) -> usize {
        match self {
            DetailContent::Empty => 0,
            DetailContent::Loading { .. } | DetailContent::EditPlaceholder { .. } => 1,
            DetailContent::Error { message } => message.lines().count().max(1),
            DetailContent::Report(report) => {
                let config = if show_config {
                    // Section plus the blank separator line
                    format_config_section(report).lines().count() + 1
                } else {
                    0
                };
                config + format_partition_section(report).lines().count()
            }
        }
    }
}

/// One-line feedback shown in the command bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Topic table rows and cursor.
///
/// Rows are addressed the way they are drawn: row 0 is the header, topic
/// `i` is row `i + 1`. The cursor only ever rests on a topic row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTable {
    topics: Vec<TopicSummary>,
    /// Index into `topics`
    cursor: usize,
}

impl TopicTable {
    pub fn new(topics: Vec<TopicSummary>) -> Self {
        Self { topics, cursor: 0 }
    }

    pub fn topics(&self) -> &[TopicSummary] {
        &self.topics
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Replace rows, keeping the cursor on the same topic when it still
    /// exists, otherwise clamping it to the new row count.
    pub fn set_topics(&mut self, topics: Vec<TopicSummary>) {
        let current = self.selected().map(|t| t.name.clone());
        self.topics = topics;
        self.cursor = current
            .and_then(|name| self.topics.iter().position(|t| t.name == name))
            .unwrap_or_else(|| self.cursor.min(self.topics.len().saturating_sub(1)));
    }

    /// Table row under the cursor (never the header)
    pub fn selected_row(&self) -> Option<usize> {
        (!self.topics.is_empty()).then_some(self.cursor + 1)
    }

    pub fn selected(&self) -> Option<&TopicSummary> {
        self.topics.get(self.cursor)
    }

    /// Topic drawn at table row `row`; `None` for the header row
    pub fn topic_at_row(&self, row: usize) -> Option<&TopicSummary> {
        row.checked_sub(1).and_then(|i| self.topics.get(i))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.topics.iter().any(|t| t.name == name)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.topics.len() {
            self.cursor += 1;
        }
    }

    pub fn move_top(&mut self) {
        self.cursor = 0;
    }

    pub fn move_bottom(&mut self) {
        self.cursor = self.topics.len().saturating_sub(1);
    }
}

/// Complete application state (the Model in TEA)
#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,
    pub view: ViewState,
    pub detail: DetailContent,
    /// First visible line of the detail panel
    pub detail_scroll: u16,
    pub topics: TopicTable,

    /// Command bar buffer
    pub command: String,
    pub status: Option<StatusMessage>,

    /// Topic of the newest describe request; older responses are dropped
    pub pending_topic: Option<String>,
    /// A topic list refresh is in flight
    pub refreshing: bool,
    pub last_refresh: Option<DateTime<Local>>,

    /// Bootstrap brokers, shown in the header
    pub brokers: Vec<String>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            phase: AppPhase::Loading,
            ui_mode: UiMode::Normal,
            view: ViewState::List,
            detail: DetailContent::Empty,
            detail_scroll: 0,
            topics: TopicTable::default(),
            command: String::new(),
            status: None,
            pending_topic: None,
            refreshing: false,
            last_refresh: None,
            brokers: settings.broker.brokers.clone(),
            settings,
        }
    }

    /// State after the startup topic listing succeeded
    pub fn with_topics(settings: Settings, topics: Vec<TopicSummary>) -> Self {
        let mut state = Self::new(settings);
        state.set_topics(topics);
        state
    }

    pub fn set_topics(&mut self, topics: Vec<TopicSummary>) {
        self.topics.set_topics(topics);
        self.refreshing = false;
        self.last_refresh = Some(Local::now());
        self.phase = AppPhase::Running;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn show_detail(&mut self, content: DetailContent) {
        self.detail = content;
        self.detail_scroll = 0;
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(DETAIL_PAGE);
    }

    /// Scroll down by a page, keeping the last line in view
    pub fn scroll_detail_down(&mut self) {
        let lines = self.detail.line_count(self.settings.ui.show_config);
        let max = u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX);
        self.detail_scroll = self.detail_scroll.saturating_add(DETAIL_PAGE).min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TopicTable {
        TopicTable::new(vec![
            TopicSummary::new("orders", 3),
            TopicSummary::new("payments", 1),
            TopicSummary::new("refunds", 2),
        ])
    }

    #[test]
    fn test_header_row_has_no_topic() {
        let table = table();
        assert!(table.topic_at_row(0).is_none());
        assert_eq!(table.topic_at_row(1).map(|t| t.name.as_str()), Some("orders"));
        assert!(table.topic_at_row(4).is_none());
    }

    #[test]
    fn test_cursor_starts_on_first_topic_row() {
        let table = table();
        assert_eq!(table.selected_row(), Some(1));
        assert_eq!(TopicTable::default().selected_row(), None);
    }

    #[test]
    fn test_cursor_is_bounded() {
        let mut table = table();
        table.move_up();
        assert_eq!(table.selected_row(), Some(1));
        table.move_bottom();
        table.move_down();
        assert_eq!(table.selected_row(), Some(3));
        table.move_top();
        assert_eq!(table.selected().map(|t| t.name.as_str()), Some("orders"));
    }

    #[test]
    fn test_set_topics_follows_selected_topic() {
        let mut table = table();
        table.move_down();
        table.set_topics(vec![
            TopicSummary::new("audit", 1),
            TopicSummary::new("payments", 1),
        ]);
        assert_eq!(table.selected().map(|t| t.name.as_str()), Some("payments"));
    }

    #[test]
    fn test_set_topics_clamps_cursor() {
        let mut table = table();
        table.move_bottom();
        table.set_topics(vec![TopicSummary::new("audit", 1)]);
        assert_eq!(table.selected_row(), Some(1));

        table.set_topics(Vec::new());
        assert_eq!(table.selected_row(), None);
    }

    #[test]
    fn test_view_topic() {
        assert_eq!(ViewState::List.topic(), None);
        let view = ViewState::Edit {
            topic: "orders".into(),
        };
        assert_eq!(view.topic(), Some("orders"));
    }

    #[test]
    fn test_app_state_starts_in_list_view() {
        let state = AppState::with_topics(Settings::default(), vec![TopicSummary::new("t", 1)]);
        assert_eq!(state.view, ViewState::List);
        assert_eq!(state.detail, DetailContent::Empty);
        assert_eq!(state.phase, AppPhase::Running);
        assert_eq!(state.brokers, vec!["localhost:9092"]);
        assert!(state.last_refresh.is_some());
    }

    fn report(partitions: i32) -> TopicReport {
        TopicReport {
            topic: "orders".into(),
            config: vec![kdash_core::ConfigEntry::new("retention.ms", "1000")],
            partitions: (0..partitions).map(kdash_core::PartitionInfo::unavailable).collect(),
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_detail_scroll_saturates() {
        let mut state = AppState::new(Settings::default());
        state.scroll_detail_up();
        assert_eq!(state.detail_scroll, 0);
        state.scroll_detail_down();
        assert_eq!(state.detail_scroll, 0);
    }

    #[test]
    fn test_report_line_count_matches_layout() {
        let content = DetailContent::Report(report(3));
        // CONFIG header, one entry, blank, PARTITION header, three partitions
        assert_eq!(content.line_count(true), 7);
        assert_eq!(content.line_count(false), 4);
        assert_eq!(DetailContent::Empty.line_count(true), 0);
        assert_eq!(
            DetailContent::Error {
                message: "down".into()
            }
            .line_count(true),
            1
        );
    }

    #[test]
    fn test_detail_scroll_stops_at_last_line() {
        let mut state = AppState::new(Settings::default());
        state.show_detail(DetailContent::Report(report(30)));

        for _ in 0..10 {
            state.scroll_detail_down();
        }
        // 34 lines: the last one stays on screen
        assert_eq!(state.detail_scroll, 33);

        state.scroll_detail_up();
        assert_eq!(state.detail_scroll, 23);
    }

    #[test]
    fn test_detail_scroll_bound_follows_show_config() {
        let mut settings = Settings::default();
        settings.ui.show_config = false;
        let mut state = AppState::new(settings);
        state.show_detail(DetailContent::Report(report(2)));

        state.scroll_detail_down();
        assert_eq!(state.detail_scroll, 2);
    }
}
