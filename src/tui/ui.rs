//! UI Rendering
//!
//! Main layout and rendering logic for the TUI.

use crate::models::{AnalysisRecord, Stage};
use crate::tui::app::{App, Focus, View};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(40)])
        .split(chunks[1]);

    widgets::render_history(frame, body[0], app);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Molecule input
            Constraint::Length(4), // Agent progress
            Constraint::Min(8),    // Results
        ])
        .split(body[1]);

    render_input(frame, main[0], app);
    widgets::render_progress(frame, main[1], &app.orchestrator.agent_states());
    render_results(frame, main[2], app);

    render_status_bar(frame, chunks[2], app);

    if app.view == View::Help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title_text = vec![Line::from(vec![
        Span::styled("molscout", Theme::title()),
        Span::styled(" — Drug Repurposing Scout", Theme::text_secondary()),
        Span::raw("  "),
        Span::styled(
            "AI-simulated • decision support only",
            Theme::text_dim(),
        ),
    ])];

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    frame.render_widget(title, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Input;

    let block = Block::default()
        .title(" Molecule ")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.input, inner);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Analysis Results ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(record) = app.orchestrator.current() {
        let paragraph =
            Paragraph::new(record_lines(&record)).scroll((app.scroll_offset, 0));
        frame.render_widget(paragraph, inner);
    } else if app.orchestrator.is_running() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Agents are analyzing... results will appear here.",
                Theme::active(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    } else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Ready to discover opportunities.",
                Theme::heading(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Enter a molecule name above to run a multi-agent analysis",
                Theme::text_secondary(),
            )),
            Line::from(Span::styled(
                "  and uncover drug repurposing opportunities.",
                Theme::text_secondary(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Build the full styled report body for the current record. Also used
/// to size the scroll region.
pub fn record_lines(record: &AnalysisRecord) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(record.molecule.clone(), Theme::heading()),
        Span::styled(
            format!("  {}", record.timestamp.format("%Y-%m-%d %H:%M UTC")),
            Theme::text_dim(),
        ),
    ]));
    lines.push(Line::from(""));

    // Synthesis first: the headline recommendation.
    section_header(&mut lines, Stage::Synthesis, "Recommendation");
    wrapped(&mut lines, &record.synthesis.recommendation);
    lines.push(Line::from(Span::styled(
        format!(
            "  Confidence: ~{:.0}% (indicative)",
            record.synthesis.confidence_score * 100.0
        ),
        Theme::text_secondary(),
    )));
    list(&mut lines, "Key opportunities", &record.synthesis.key_opportunities);
    list(&mut lines, "Risks", &record.synthesis.risks);
    list(&mut lines, "Next steps", &record.synthesis.next_steps);

    section_header(&mut lines, Stage::Market, "Market Insights");
    lines.push(Line::from(Span::styled(
        format!(
            "  Est. market size ~${:.1}B, CAGR ~{:.1}%",
            record.market.market_size_bn, record.market.cagr_pct
        ),
        Theme::text(),
    )));
    wrapped(&mut lines, &record.market.summary);
    list(&mut lines, "Leading competitors", &record.market.leading_competitors);
    list(&mut lines, "Growth drivers", &record.market.growth_drivers);

    section_header(&mut lines, Stage::Clinical, "Clinical Trials");
    lines.push(Line::from(Span::styled(
        format!("  ~{} active trials", record.clinical.total_trials),
        Theme::text(),
    )));
    for phase in &record.clinical.phases {
        lines.push(Line::from(Span::styled(
            format!("    {} {}: {}", Icons::DOT, phase.phase, phase.count),
            Theme::text_secondary(),
        )));
    }
    wrapped(&mut lines, &record.clinical.insights);
    list(&mut lines, "Sponsors", &record.clinical.sponsors);
    list(&mut lines, "Indications", &record.clinical.indications);

    section_header(&mut lines, Stage::Patent, "Patent Landscape");
    let expiry: Vec<String> = record
        .patent
        .expiry_years
        .iter()
        .map(|y| y.to_string())
        .collect();
    lines.push(Line::from(Span::styled(
        format!(
            "  ~{} related patents, expiries {}",
            record.patent.total_patents,
            expiry.join(", ")
        ),
        Theme::text(),
    )));
    lines.push(Line::from(Span::styled(
        format!("  FTO: {}", record.patent.fto_status),
        Theme::text(),
    )));
    wrapped(&mut lines, &record.patent.notes);
    list(&mut lines, "Holders", &record.patent.holders);

    section_header(&mut lines, Stage::Research, "Research & Publications");
    lines.push(Line::from(Span::styled(
        format!(
            "  ~{}+ publications, sentiment {}",
            record.research.publications_count, record.research.sentiment
        ),
        Theme::text(),
    )));
    for publication in &record.research.publications {
        lines.push(Line::from(Span::styled(
            format!(
                "    {} \"{}\" ({}) - {}",
                Icons::DOT, publication.title, publication.year, publication.journal
            ),
            Theme::text_secondary(),
        )));
    }
    list(&mut lines, "Key findings", &record.research.key_findings);
    lines.push(Line::from(""));

    lines
}

fn section_header(lines: &mut Vec<Line<'static>>, stage: Stage, title: &str) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("▌ {title}"),
        Theme::stage(stage),
    )));
}

fn wrapped(lines: &mut Vec<Line<'static>>, text: &str) {
    // Soft wrap at ~80 columns; ratatui re-wraps narrower viewports.
    let mut current = String::from("  ");
    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > 80 {
            lines.push(Line::from(Span::styled(current.clone(), Theme::text())));
            current = String::from("  ");
        }
        if current.len() > 2 {
            current.push(' ');
        }
        current.push_str(word);
    }
    if current.trim().is_empty() {
        return;
    }
    lines.push(Line::from(Span::styled(current, Theme::text())));
}

fn list(lines: &mut Vec<Line<'static>>, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::from(Span::styled(
        format!("  {label}:"),
        Theme::text_secondary(),
    )));
    for item in items {
        lines.push(Line::from(Span::styled(
            format!("    {} {item}", Icons::DOT),
            Theme::text(),
        )));
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = if let Some(notice) = &app.notice {
        if notice.is_error {
            Span::styled(notice.text.clone(), Theme::error())
        } else {
            Span::styled(notice.text.clone(), Theme::success())
        }
    } else {
        let states = app.orchestrator.agent_states();
        if app.orchestrator.is_running() {
            Span::styled("Analyzing...", Theme::active())
        } else if states.any_error() {
            Span::styled("Run failed", Theme::error())
        } else if states.all_complete() {
            Span::styled("Complete", Theme::complete())
        } else {
            Span::styled("Ready", Theme::text_secondary())
        }
    };

    let shortcuts = vec![
        Span::styled(" [Enter]", Theme::shortcut_key()),
        Span::styled(" Analyze ", Theme::shortcut_desc()),
        Span::styled("[Tab]", Theme::shortcut_key()),
        Span::styled(" Pane ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+E]", Theme::shortcut_key()),
        Span::styled(" Export ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+Q]", Theme::shortcut_key()),
        Span::styled(" Quit ", Theme::shortcut_desc()),
        Span::styled("[F1]", Theme::shortcut_key()),
        Span::styled(" Help", Theme::shortcut_desc()),
    ];

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter        ", Theme::shortcut_key()),
            Span::styled("Run analysis / open history entry", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Tab          ", Theme::shortcut_key()),
            Span::styled("Switch between input and history", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+E       ", Theme::shortcut_key()),
            Span::styled("Export current report as text", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+J       ", Theme::shortcut_key()),
            Span::styled("Export current report as JSON", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+D       ", Theme::shortcut_key()),
            Span::styled("Delete selected history entry", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("↑/↓          ", Theme::shortcut_key()),
            Span::styled("Scroll results / move selection", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("PageUp/Down  ", Theme::shortcut_key()),
            Span::styled("Scroll page", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Esc          ", Theme::shortcut_key()),
            Span::styled("Close help / dismiss notice", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+Q/C     ", Theme::shortcut_key()),
            Span::styled("Quit", Theme::text()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Theme::text_dim())),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
