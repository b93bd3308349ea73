//! History Sidebar Widget
//!
//! Session history of completed analyses, most recent first.

use crate::tui::app::{App, Focus};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the history sidebar
pub fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::History;

    let block = Block::default()
        .title(" History ")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let history = app.orchestrator.history();
    if history.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(" No analyses yet", Theme::text_dim())),
        ]);
        frame.render_widget(hint, inner);
        return;
    }

    let current_id = app.orchestrator.current().map(|r| r.id);

    let items: Vec<ListItem> = history
        .iter()
        .map(|record| {
            let marker = if Some(record.id) == current_id {
                Icons::SELECTED
            } else {
                " "
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} "), Theme::selected()),
                Span::styled(record.molecule.clone(), Theme::text()),
                Span::styled(
                    format!(
                        "  {} · {:.0}%",
                        record.timestamp.format("%H:%M"),
                        record.synthesis.confidence_score * 100.0
                    ),
                    Theme::text_dim(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected());

    let mut state = ListState::default();
    if is_focused {
        state.select(Some(app.history_index.min(history.len() - 1)));
    }

    frame.render_stateful_widget(list, area, &mut state);
}
