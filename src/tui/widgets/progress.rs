//! Progress Widget
//!
//! Displays the five pipeline stages with their current status. Because
//! every stage carries its own status, completions show up in whatever
//! order the agent latencies resolve.

use crate::models::{AgentStates, AgentStatus, Stage};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the agent progress indicator
pub fn render_progress(frame: &mut Frame, area: Rect, states: &AgentStates) {
    let block = Block::default()
        .title(" Agents ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(build_stage_spans(states)),
        Line::from(Span::styled(
            "4 category agents fan out in parallel, then synthesis combines them",
            Theme::text_dim(),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn build_stage_spans(states: &AgentStates) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, stage) in Stage::ALL.iter().enumerate() {
        let (icon, style) = match states.get(*stage) {
            AgentStatus::Complete => (Icons::COMPLETE, Theme::complete()),
            AgentStatus::Running => (Icons::ACTIVE, Theme::active()),
            AgentStatus::Idle => (Icons::PENDING, Theme::pending()),
            AgentStatus::Error => (Icons::ERROR, Theme::error()),
        };

        spans.push(Span::styled(format!("{icon} "), style));
        spans.push(Span::styled(stage.name().to_string(), style));

        if i < Stage::ALL.len() - 1 {
            spans.push(Span::styled(
                format!(" {} ", Icons::ARROW),
                Theme::text_dim(),
            ));
        }
    }

    spans
}
