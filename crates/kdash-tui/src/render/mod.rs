//! Main render/view function (View in TEA pattern)

use ratatui::{style::Style, widgets::Block, Frame};

use kdash_app::state::{AppState, ViewState};

use crate::theme::palette;
use crate::{layout, widgets};


/// Render the complete UI
///
/// Pure function of the state; scroll offsets live in `AppState`.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);

    let header = widgets::MainHeader::new(&state.brokers)
        .phase(state.phase, state.refreshing)
        .last_refresh(state.last_refresh);
    frame.render_widget(header, areas.header);

    let command_bar =
        widgets::CommandBar::new(state.ui_mode, &state.command).status(state.status.as_ref());
    if let Some(position) = command_bar.cursor_position(areas.command) {
        frame.set_cursor_position(position);
    }
    frame.render_widget(command_bar, areas.command);

    let detail_focused = matches!(state.view, ViewState::Detail { .. } | ViewState::Edit { .. });

    frame.render_widget(
        widgets::TopicTableView::new(&state.topics).focused(!detail_focused),
        areas.table,
    );

    frame.render_widget(
        widgets::DetailPanel::new(&state.detail)
            .show_config(state.settings.ui.show_config)
            .scroll(state.detail_scroll)
            .focused(detail_focused),
        areas.detail,
    );

    frame.render_widget(widgets::Footer::new(state.ui_mode), areas.footer);
}
